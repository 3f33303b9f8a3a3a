use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::EnvFilter;
use weather_core::{AppConfig, ErrorExt, UnavailableReport};
use weather_service::{build_service, WeatherResponse};

const DEFAULT_LOG_FILTER: &str = "agent_weather=info,weather_service=info,moltbook_client=info,\
llm_interface=info,mood_engine=info,report_cache=info,weather_core=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("Starting Agent Weather");

    let force_refresh = std::env::args().skip(1).any(|arg| arg == "--refresh");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            e.log_error();
            return Err(e).context("loading configuration");
        }
    };
    let service = build_service(&config)
        .await
        .context("building weather service")?;

    let response = if force_refresh {
        match service.refresh().await {
            Ok(report) => WeatherResponse::Fresh(report),
            Err(e) => {
                tracing::error!("Refresh failed: {}", e.user_friendly_message());
                WeatherResponse::Unavailable(UnavailableReport::new(Utc::now()))
            }
        }
    } else {
        service.current_report().await
    };

    match &response {
        WeatherResponse::Cached(_) => tracing::info!("Report served from cache"),
        WeatherResponse::Fresh(_) => tracing::info!("Report freshly computed"),
        WeatherResponse::Stale(_) => tracing::warn!("Report served from stale cache"),
        WeatherResponse::Unavailable(_) => tracing::error!("No report available"),
    }

    let body = response.to_json().context("serializing report")?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !response.is_available() {
        std::process::exit(1);
    }
    Ok(())
}
