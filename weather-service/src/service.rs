use crate::pipeline::WeatherPipeline;
use chrono::{DateTime, Duration, Utc};
use report_cache::{load_report, store_report, CacheStore};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use weather_core::{
    CacheError, CachedReport, CoreError, ErrorReporter, MoodReport, UnavailableReport,
};

/// What a caller gets back, in order of preference.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherResponse {
    /// Cached report younger than the TTL; the pipeline did not run.
    Cached(MoodReport),
    /// Freshly computed report.
    Fresh(MoodReport),
    /// The pipeline failed and an older cached report was served instead.
    Stale(MoodReport),
    Unavailable(UnavailableReport),
}

impl WeatherResponse {
    pub fn report(&self) -> Option<&MoodReport> {
        match self {
            WeatherResponse::Cached(report)
            | WeatherResponse::Fresh(report)
            | WeatherResponse::Stale(report) => Some(report),
            WeatherResponse::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.report().is_some()
    }

    pub fn status_code(&self) -> u16 {
        if self.is_available() {
            200
        } else {
            500
        }
    }

    pub fn to_json(&self) -> Result<Value, CoreError> {
        let value = match self {
            WeatherResponse::Unavailable(payload) => serde_json::to_value(payload)?,
            WeatherResponse::Cached(report)
            | WeatherResponse::Fresh(report)
            | WeatherResponse::Stale(report) => serde_json::to_value(report)?,
        };
        Ok(value)
    }
}

pub struct WeatherService {
    pipeline: WeatherPipeline,
    cache: Arc<dyn CacheStore>,
    cache_key: String,
    ttl: Duration,
    reporter: ErrorReporter,
}

impl WeatherService {
    pub fn new(
        pipeline: WeatherPipeline,
        cache: Arc<dyn CacheStore>,
        cache_key: String,
        ttl: Duration,
    ) -> Self {
        Self {
            pipeline,
            cache,
            cache_key,
            ttl,
            reporter: ErrorReporter::new(),
        }
    }

    pub async fn current_report(&self) -> WeatherResponse {
        self.current_report_at(Utc::now()).await
    }

    /// Serves a fresh cache hit, else recomputes; on failure falls back to a
    /// stale cache entry and finally to the fixed unavailable payload.
    pub async fn current_report_at(&self, now: DateTime<Utc>) -> WeatherResponse {
        let cached = self.read_cache().await;

        if let Some(entry) = &cached {
            if entry.is_fresh(now, self.ttl) {
                info!("Serving cached report from {}", entry.timestamp);
                return WeatherResponse::Cached(entry.report.clone());
            }
        }

        match self.pipeline.produce_report().await {
            Ok(report) => {
                self.write_cache(&CachedReport::new(report.clone(), now))
                    .await;
                WeatherResponse::Fresh(report)
            }
            Err(error) => {
                self.reporter.report_error(&error);
                match cached {
                    Some(entry) => {
                        warn!("Serving stale report from {}", entry.timestamp);
                        WeatherResponse::Stale(entry.report)
                    }
                    None => WeatherResponse::Unavailable(UnavailableReport::new(now)),
                }
            }
        }
    }

    /// Runs the pipeline and stores the result, ignoring any cached entry.
    pub async fn refresh(&self) -> Result<MoodReport, CoreError> {
        let report = self.pipeline.produce_report().await?;
        self.write_cache(&CachedReport::new(report.clone(), Utc::now()))
            .await;
        Ok(report)
    }

    async fn read_cache(&self) -> Option<CachedReport> {
        match load_report(self.cache.as_ref(), &self.cache_key).await {
            Ok(entry) => entry,
            Err(error) => {
                self.report_cache_error(error);
                None
            }
        }
    }

    async fn write_cache(&self, entry: &CachedReport) {
        if let Err(error) = store_report(self.cache.as_ref(), &self.cache_key, entry).await {
            self.report_cache_error(error);
        }
    }

    fn report_cache_error(&self, error: CacheError) {
        self.reporter.report_warning(&CoreError::Cache(error));
    }
}
