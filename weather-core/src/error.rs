use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Post fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("Post source unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("Request timeout for sort={sort}")]
    RequestTimeout { sort: String },

    #[error("Invalid post source token")]
    InvalidToken,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Unexpected status {status_code} for sort={sort}")]
    UnexpectedStatus { sort: String, status_code: u16 },

    #[error("Malformed post listing: {details}")]
    MalformedResponse { details: String },
}

#[derive(Error, Debug, Clone)]
pub enum ClassifierError {
    #[error("API key invalid or missing for {provider}")]
    InvalidApiKey { provider: String },

    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    #[error("Request timeout for {provider}")]
    RequestTimeout { provider: String },

    #[error("Provider service unavailable: {provider} (status {status_code})")]
    ServiceUnavailable { provider: String, status_code: u16 },

    #[error("Request to {provider} failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response format from {provider}")]
    InvalidResponseFormat { provider: String },

    #[error("Model output is not valid JSON: {details}")]
    Parse { details: String },
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Cache store not connected")]
    NotConnected,

    #[error("Migration {migration} failed: {reason}")]
    MigrationFailed { migration: String, reason: String },

    #[error("Corrupt cache entry for key {key}: {reason}")]
    CorruptEntry { key: String, reason: String },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
