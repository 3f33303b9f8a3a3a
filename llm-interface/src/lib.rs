pub mod parse;
pub mod prompt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use weather_core::{ClassifierConfig, ClassifierError, CoreError, MoodClassification, Post};

pub use parse::{extract_json_block, parse_classification};
pub use prompt::build_prompt;

const PROVIDER: &str = "anthropic";
const MESSAGES_ENDPOINT: &str = "/v1/messages";

#[async_trait]
pub trait MoodClassifier: Send + Sync {
    async fn classify(&self, posts: &[Post]) -> Result<MoodClassification, CoreError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

pub struct ClaudeProvider {
    http_client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    api_version: String,
    prompt_post_limit: usize,
    post_url_base: String,
}

impl ClaudeProvider {
    pub fn new(config: &ClassifierConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                MESSAGES_ENDPOINT
            ),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_version: config.api_version.clone(),
            prompt_post_limit: config.prompt_post_limit,
            post_url_base: config.post_url_base.clone(),
        })
    }

    /// Sends one prompt and returns the model's raw text answer.
    pub async fn complete(&self, prompt: String) -> Result<String, ClassifierError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        info!("Requesting mood classification from {}", self.model);
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Network error calling {}: {}", PROVIDER, e);
                if e.is_timeout() {
                    ClassifierError::RequestTimeout {
                        provider: PROVIDER.to_string(),
                    }
                } else {
                    ClassifierError::RequestFailed {
                        provider: PROVIDER.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Classifier request failed with status: {}", status);
            return Err(match status.as_u16() {
                401 | 403 => ClassifierError::InvalidApiKey {
                    provider: PROVIDER.to_string(),
                },
                429 => ClassifierError::RateLimitExceeded {
                    provider: PROVIDER.to_string(),
                },
                code if status.is_server_error() => {
                    ClassifierError::ServiceUnavailable {
                        provider: PROVIDER.to_string(),
                        status_code: code,
                    }
                }
                code => ClassifierError::RequestFailed {
                    provider: PROVIDER.to_string(),
                    reason: format!("status {}", code),
                },
            });
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            error!("Failed to decode {} response: {}", PROVIDER, e);
            ClassifierError::InvalidResponseFormat {
                provider: PROVIDER.to_string(),
            }
        })?;

        parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| ClassifierError::InvalidResponseFormat {
                provider: PROVIDER.to_string(),
            })
    }
}

#[async_trait]
impl MoodClassifier for ClaudeProvider {
    async fn classify(&self, posts: &[Post]) -> Result<MoodClassification, CoreError> {
        let prompt = build_prompt(posts, self.prompt_post_limit, &self.post_url_base);
        debug!("Classifier prompt is {} characters", prompt.len());

        let answer = self.complete(prompt).await?;
        let classification = parse_classification(&answer)?;

        info!(
            "Classified {} posts as {:?}",
            posts.len(),
            classification.primary_mood
        );
        Ok(classification)
    }
}
