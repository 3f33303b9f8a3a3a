use crate::CacheStore;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};
use weather_core::CacheError;

const CREATE_CACHE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cache_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)";

pub struct SqliteStore {
    connection_string: String,
    pool: Option<SqlitePool>,
}

impl SqliteStore {
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            pool: None,
        }
    }

    /// Connects and prepares the schema in one step.
    pub async fn open(connection_string: String) -> Result<Self, CacheError> {
        let mut store = Self::new(connection_string);
        store.connect().await?;
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn connect(&mut self) -> Result<(), CacheError> {
        let options = SqliteConnectOptions::from_str(&self.connection_string)
            .map_err(|e| CacheError::ConnectionFailed {
                reason: e.to_string(),
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| CacheError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        info!("Connected to cache database {}", self.connection_string);
        self.pool = Some(pool);
        Ok(())
    }

    pub async fn run_migrations(&self) -> Result<(), CacheError> {
        sqlx::query(CREATE_CACHE_TABLE)
            .execute(self.pool()?)
            .await
            .map_err(|e| CacheError::MigrationFailed {
                migration: "create cache_entries".to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn pool(&self) -> Result<&SqlitePool, CacheError> {
        self.pool.as_ref().ok_or(CacheError::NotConnected)
    }
}

#[async_trait]
impl CacheStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let row = sqlx::query_as::<_, (String,)>("SELECT value FROM cache_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool()?)
            .await?;

        match row {
            Some((raw,)) => {
                let value =
                    serde_json::from_str(&raw).map_err(|e| CacheError::CorruptEntry {
                        key: key.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        sqlx::query(
            "INSERT INTO cache_entries (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value.to_string())
        .bind(Utc::now().timestamp())
        .execute(self.pool()?)
        .await?;

        debug!("Stored cache entry {}", key);
        Ok(())
    }
}
