use chrono::Utc;
use llm_interface::{ClaudeProvider, MoodClassifier};
use moltbook_client::{MoltbookClient, PostSource};
use mood_engine::{aggregate, HeuristicAnalysis};
use std::sync::Arc;
use tracing::{info, warn};
use weather_core::{AppConfig, CoreError, MoodReport};

/// Fetch, classify, score and aggregate. Either a whole report or an error.
pub struct WeatherPipeline {
    source: Arc<dyn PostSource>,
    classifier: Arc<dyn MoodClassifier>,
    profile_base_url: String,
}

impl WeatherPipeline {
    pub fn new(
        source: Arc<dyn PostSource>,
        classifier: Arc<dyn MoodClassifier>,
        profile_base_url: String,
    ) -> Self {
        Self {
            source,
            classifier,
            profile_base_url,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let source = MoltbookClient::new(&config.moltbook)?;
        let classifier = ClaudeProvider::new(&config.classifier)?;
        Ok(Self::new(
            Arc::new(source),
            Arc::new(classifier),
            config.moltbook.profile_base_url.clone(),
        ))
    }

    pub async fn produce_report(&self) -> Result<MoodReport, CoreError> {
        let posts = self.source.fetch_posts().await?;
        if posts.is_empty() {
            warn!("Post source returned no posts; classifying an empty batch");
        }

        let classification = self.classifier.classify(&posts).await?;
        let analysis = HeuristicAnalysis::run(&posts, &self.profile_base_url);

        let report = aggregate(
            classification,
            &analysis.trend,
            analysis.leaderboard,
            Utc::now(),
        );

        info!(
            "Produced mood report: {:?}, trend {:?}, {} leaderboard entries",
            report.primary_mood,
            report.trend_direction,
            report.agent_leaderboard.len()
        );
        Ok(report)
    }
}
