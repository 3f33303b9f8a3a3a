pub mod memory;
pub mod sqlite;


use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use weather_core::{CacheError, CachedReport};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key-value collaborator holding the last computed report.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;
    async fn set(&self, key: &str, value: &Value) -> Result<(), CacheError>;
}

pub async fn load_report(
    store: &dyn CacheStore,
    key: &str,
) -> Result<Option<CachedReport>, CacheError> {
    let Some(value) = store.get(key).await? else {
        debug!("No cached report under {}", key);
        return Ok(None);
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| CacheError::CorruptEntry {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

pub async fn store_report(
    store: &dyn CacheStore,
    key: &str,
    cached: &CachedReport,
) -> Result<(), CacheError> {
    let value = serde_json::to_value(cached).map_err(|e| CacheError::CorruptEntry {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &value).await
}
