use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

pub const CONFIG_PATH_ENV: &str = "AGENT_WEATHER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "agent-weather.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub moltbook: MoltbookConfig,
    pub classifier: ClassifierConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoltbookConfig {
    pub base_url: String,
    pub api_key: String,
    /// Posts requested per sort order.
    pub sample_limit: u32,
    /// Posts kept after merging both samples.
    pub max_posts: usize,
    pub profile_base_url: String,
    pub timeout_secs: u64,
}

impl Default for MoltbookConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.moltbook.com".to_string(),
            api_key: String::new(),
            sample_limit: 30,
            max_posts: 50,
            profile_base_url: "https://www.moltbook.com".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_version: String,
    /// Zero embeds every fetched post in the prompt.
    pub prompt_post_limit: usize,
    pub post_url_base: String,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            api_key: String::new(),
            model: "claude-haiku-4-5-20251001".to_string(),
            max_tokens: 2000,
            api_version: "2023-06-01".to_string(),
            prompt_post_limit: 30,
            post_url_base: "https://www.moltbook.com".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub key: String,
    pub ttl_hours: i64,
    /// SQLite URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: crate::types::WEATHER_CACHE_KEY.to_string(),
            ttl_hours: 24,
            database_url: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours)
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;
        Self::from_toml_str(&contents)
    }

    /// Reads the TOML file (explicit path from the environment, else the
    /// default path if present), applies environment overrides and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                info!("Loading configuration from {}", path);
                Self::from_file(Path::new(&path))?
            }
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("MOLTBOOK_API_KEY") {
            self.moltbook.api_key = key;
        }
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            self.classifier.api_key = key;
        }
        if let Some(url) = lookup("AGENT_WEATHER_CACHE_URL") {
            self.cache.database_url = Some(url);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moltbook.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "moltbook.api_key".to_string(),
            });
        }
        if self.classifier.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "classifier.api_key".to_string(),
            });
        }
        if self.moltbook.sample_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "moltbook.sample_limit".to_string(),
                value: "0".to_string(),
            });
        }
        if self.cache.ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl_hours".to_string(),
                value: self.cache.ttl_hours.to_string(),
            });
        }
        Ok(())
    }
}
