use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Fetch(e) => {
                error!("Post fetch error details: {:?}", e);
            }
            CoreError::Classifier(e) => {
                error!("Classifier error details: {:?}", e);
            }
            CoreError::Cache(e) => {
                error!("Cache error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Fetch(e) => e.user_friendly_message(),
            CoreError::Classifier(e) => e.user_friendly_message(),
            CoreError::Cache(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            _ => "Unable to fetch mood data".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Fetch(_) => "FETCH".to_string(),
            CoreError::Classifier(_) => "CLASSIFIER".to_string(),
            CoreError::Cache(_) => "CACHE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
        }
    }
}

impl ErrorExt for FetchError {
    fn log_error(&self) -> &Self {
        error!("FetchError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("FetchError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            FetchError::InvalidToken => {
                "Moltbook API key was rejected. Please check MOLTBOOK_API_KEY.".to_string()
            }
            FetchError::RateLimited => {
                "Moltbook is rate limiting requests. Please try again later.".to_string()
            }
            FetchError::RequestTimeout { .. } => {
                "Request to Moltbook timed out. Please try again.".to_string()
            }
            _ => "Unable to fetch posts from Moltbook.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            FetchError::Unreachable { .. } => "FETCH_UNREACHABLE".to_string(),
            FetchError::RequestTimeout { .. } => "FETCH_TIMEOUT".to_string(),
            FetchError::InvalidToken => "FETCH_INVALID_TOKEN".to_string(),
            FetchError::RateLimited => "FETCH_RATE_LIMIT".to_string(),
            FetchError::UnexpectedStatus { .. } => "FETCH_UNEXPECTED_STATUS".to_string(),
            FetchError::MalformedResponse { .. } => "FETCH_MALFORMED_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for ClassifierError {
    fn log_error(&self) -> &Self {
        error!("ClassifierError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ClassifierError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ClassifierError::InvalidApiKey { provider } => {
                format!("API key for {} is invalid or missing.", provider)
            }
            ClassifierError::RateLimitExceeded { provider } => {
                format!("{} is rate limiting requests. Please try again later.", provider)
            }
            ClassifierError::RequestTimeout { provider } => {
                format!("Request to {} timed out. Please try again.", provider)
            }
            ClassifierError::ServiceUnavailable { provider, .. } => {
                format!("{} is currently unavailable.", provider)
            }
            ClassifierError::Parse { .. } => {
                "The mood classifier returned an unreadable answer.".to_string()
            }
            _ => "Mood classification failed. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ClassifierError::InvalidApiKey { .. } => "CLASSIFIER_INVALID_API_KEY".to_string(),
            ClassifierError::RateLimitExceeded { .. } => "CLASSIFIER_RATE_LIMIT".to_string(),
            ClassifierError::RequestTimeout { .. } => "CLASSIFIER_TIMEOUT".to_string(),
            ClassifierError::ServiceUnavailable { .. } => "CLASSIFIER_UNAVAILABLE".to_string(),
            ClassifierError::RequestFailed { .. } => "CLASSIFIER_REQUEST_FAILED".to_string(),
            ClassifierError::InvalidResponseFormat { .. } => {
                "CLASSIFIER_INVALID_RESPONSE".to_string()
            }
            ClassifierError::Parse { .. } => "CLASSIFIER_PARSE_ERROR".to_string(),
        }
    }
}

impl ErrorExt for CacheError {
    fn log_error(&self) -> &Self {
        error!("CacheError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CacheError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CacheError::ConnectionFailed { .. } | CacheError::NotConnected => {
                "Report cache is unavailable; serving uncached data.".to_string()
            }
            CacheError::CorruptEntry { .. } => {
                "Cached report could not be read and was ignored.".to_string()
            }
            _ => "Report cache error occurred.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CacheError::ConnectionFailed { .. } => "CACHE_CONNECTION_FAILED".to_string(),
            CacheError::NotConnected => "CACHE_NOT_CONNECTED".to_string(),
            CacheError::MigrationFailed { .. } => "CACHE_MIGRATION_FAILED".to_string(),
            CacheError::CorruptEntry { .. } => "CACHE_CORRUPT_ENTRY".to_string(),
            CacheError::Sql(_) => "CACHE_SQL_ERROR".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::MissingField { field } => {
                format!("Required configuration field '{}' is missing.", field)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::MissingField { .. } => "CONFIG_MISSING_FIELD".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

/// Logs pipeline failures at the service boundary.
#[derive(Debug)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_error(&self, error: &CoreError) {
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!("User message: {}", error.user_friendly_message());
    }

    pub fn report_warning(&self, error: &CoreError) {
        error.log_warn();
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
