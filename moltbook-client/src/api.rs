use crate::listing::{merge_samples, normalize_listing};
use crate::PostSource;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;
use weather_core::{ConfigError, CoreError, FetchError, MoltbookConfig, Post};

const POSTS_ENDPOINT: &str = "/api/v1/posts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Hot,
    New,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::New => "new",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct MoltbookClient {
    http_client: Client,
    posts_url: Url,
    api_key: String,
    sample_limit: u32,
    max_posts: usize,
}

impl MoltbookClient {
    pub fn new(config: &MoltbookConfig) -> Result<Self, CoreError> {
        let posts_url = Url::parse(&config.base_url)
            .and_then(|base| base.join(POSTS_ENDPOINT))
            .map_err(|_| ConfigError::InvalidValue {
                field: "moltbook.base_url".to_string(),
                value: config.base_url.clone(),
            })?;

        let http_client = Client::builder()
            .user_agent(concat!("agent-weather/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            posts_url,
            api_key: config.api_key.clone(),
            sample_limit: config.sample_limit,
            max_posts: config.max_posts,
        })
    }

    pub fn posts_url(&self) -> &Url {
        &self.posts_url
    }

    async fn make_request(&self, sort: SortOrder, limit: u32) -> Result<Response, CoreError> {
        let start_time = Instant::now();
        let limit_str = limit.to_string();
        let params = [("sort", sort.as_str()), ("limit", limit_str.as_str())];

        info!("Fetching Moltbook posts: sort={} limit={}", sort, limit);
        let response = self
            .http_client
            .get(self.posts_url.clone())
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for sort={}: {}", sort, e);
                if e.is_timeout() {
                    FetchError::RequestTimeout {
                        sort: sort.to_string(),
                    }
                } else {
                    FetchError::Unreachable {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request failed with status: {} for sort={}", status, sort);
            let error = match status.as_u16() {
                401 | 403 => FetchError::InvalidToken,
                429 => {
                    warn!("Moltbook is rate limiting requests");
                    FetchError::RateLimited
                }
                code => FetchError::UnexpectedStatus {
                    sort: sort.to_string(),
                    status_code: code,
                },
            };
            return Err(error.into());
        }

        debug!(
            "Request successful: {} for sort={} in {:?}",
            status,
            sort,
            start_time.elapsed()
        );
        Ok(response)
    }

    /// Fetches one ranked sample and unwraps whichever listing shape it uses.
    pub async fn fetch_sample(&self, sort: SortOrder, limit: u32) -> Result<Vec<Value>, CoreError> {
        let response = self.make_request(sort, limit).await?;

        let body: Value = response.json().await.map_err(|e| {
            error!("Failed to parse posts for sort={}: {}", sort, e);
            FetchError::MalformedResponse {
                details: format!("sort={}: {}", sort, e),
            }
        })?;

        let posts = normalize_listing(body);
        info!("Retrieved {} posts for sort={}", posts.len(), sort);
        Ok(posts)
    }
}

#[async_trait]
impl PostSource for MoltbookClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, CoreError> {
        let (hot, new) = futures::future::try_join(
            self.fetch_sample(SortOrder::Hot, self.sample_limit),
            self.fetch_sample(SortOrder::New, self.sample_limit),
        )
        .await?;

        let fetched = hot.len() + new.len();
        let posts = merge_samples(hot, new, self.max_posts);
        info!(
            "Merged {} fetched posts into {} unique posts",
            fetched,
            posts.len()
        );
        Ok(posts)
    }
}
