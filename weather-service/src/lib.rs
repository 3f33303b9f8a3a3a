pub mod pipeline;
pub mod service;


use report_cache::{CacheStore, MemoryStore, SqliteStore};
use std::sync::Arc;
use tracing::{info, warn};
use weather_core::{AppConfig, CoreError};

pub use pipeline::WeatherPipeline;
pub use service::{WeatherResponse, WeatherService};

/// Opens the configured cache store. An unusable database degrades to the
/// in-memory store instead of failing startup.
pub async fn open_cache(config: &AppConfig) -> Arc<dyn CacheStore> {
    match &config.cache.database_url {
        Some(url) => match SqliteStore::open(url.clone()).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Cache database unavailable ({}), using in-memory cache", e);
                Arc::new(MemoryStore::new())
            }
        },
        None => {
            info!("No cache database configured, using in-memory cache");
            Arc::new(MemoryStore::new())
        }
    }
}

pub async fn build_service(config: &AppConfig) -> Result<WeatherService, CoreError> {
    let pipeline = WeatherPipeline::from_config(config)?;
    let cache = open_cache(config).await;
    Ok(WeatherService::new(
        pipeline,
        cache,
        config.cache.key.clone(),
        config.cache.ttl(),
    ))
}
