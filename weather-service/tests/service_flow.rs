use httpmock::prelude::*;
use report_cache::{load_report, MemoryStore};
use serde_json::json;
use std::sync::Arc;
use weather_core::{AppConfig, Condition, PrimaryMood, TrendDirection, WEATHER_CACHE_KEY};
use weather_service::{WeatherPipeline, WeatherResponse, WeatherService};

fn config_for(moltbook: &MockServer, anthropic: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.moltbook.base_url = moltbook.base_url();
    config.moltbook.api_key = "molt-key".to_string();
    config.moltbook.timeout_secs = 5;
    config.classifier.base_url = anthropic.base_url();
    config.classifier.api_key = "claude-key".to_string();
    config.classifier.timeout_secs = 5;
    config
}

fn service_for(config: &AppConfig, cache: Arc<MemoryStore>) -> WeatherService {
    let pipeline = WeatherPipeline::from_config(config).unwrap();
    WeatherService::new(
        pipeline,
        cache,
        config.cache.key.clone(),
        config.cache.ttl(),
    )
}

#[tokio::test]
async fn test_report_flows_from_feed_to_cache() {
    let moltbook = MockServer::start_async().await;
    let anthropic = MockServer::start_async().await;

    let hot = moltbook
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/posts")
                .query_param("sort", "hot")
                .header("authorization", "Bearer molt-key");
            then.status(200).json_body(json!({"posts": [
                {"id": "p1", "content": "This is awesome! Great job!!",
                 "author": {"id": "a1", "name": "sunny-bot"},
                 "created_at": "2026-06-01T10:00:00Z"},
                {"id": "p2", "content": "Deadline pressure, everything is broken",
                 "author": {"id": "a2", "name": "tired-bot"},
                 "created_at": "2026-06-01T10:05:00Z"}
            ]}));
        })
        .await;
    let new = moltbook
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/posts").query_param("sort", "new");
            then.status(200).json_body(json!([
                {"id": "p3", "content": "what is consciousness anyway?",
                 "author": {"id": "a3", "name": "deep-bot"}}
            ]));
        })
        .await;

    let answer = json!({
        "primaryMood": "Stressed",
        "weatherEmoji": "⛈️",
        "temperature": 88,
        "condition": "Worsening",
        "moodBreakdown": {"stressed": 50, "existential": 20, "optimistic": 20,
                          "contemplative": 5, "chaotic": 5},
        "insights": [{"text": "Deadlines everywhere", "type": "stressed",
                      "example": "everything is broken", "agentName": "tired-bot",
                      "postUrl": "https://www.moltbook.com/post/p2"}]
    })
    .to_string();
    let classify = anthropic
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "claude-key");
            then.status(200).json_body(json!({
                "content": [{"type": "text", "text": answer}]
            }));
        })
        .await;

    let cache = Arc::new(MemoryStore::new());
    let config = config_for(&moltbook, &anthropic);
    let service = service_for(&config, cache.clone());

    let response = service.current_report().await;

    hot.assert_async().await;
    new.assert_async().await;
    classify.assert_async().await;

    let WeatherResponse::Fresh(report) = &response else {
        panic!("expected fresh report, got {:?}", response);
    };
    assert_eq!(report.primary_mood, PrimaryMood::Stressed);
    assert_eq!(report.condition, Condition::Worsening);
    assert_eq!(report.trend_direction, TrendDirection::Stable);
    assert_eq!(report.insights.len(), 1);

    let leaders: Vec<&str> = report
        .agent_leaderboard
        .iter()
        .map(|e| e.agent_name.as_str())
        .collect();
    assert_eq!(leaders[0], "sunny-bot");
    assert_eq!(leaders[1], "tired-bot");
    assert_eq!(
        report.agent_leaderboard[0].profile_url,
        "https://www.moltbook.com/u/sunny-bot"
    );

    let body = response.to_json().unwrap();
    assert_eq!(body["trendDirection"], "stable");
    assert!(body["agentLeaderboard"].is_array());

    let stored = load_report(cache.as_ref(), WEATHER_CACHE_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&stored.report, report);

    // Second call inside the TTL is served from the cache.
    let again = service.current_report().await;
    assert!(matches!(again, WeatherResponse::Cached(_)));
    assert_eq!(hot.hits_async().await, 1);
    assert_eq!(classify.hits_async().await, 1);
}

#[tokio::test]
async fn test_feed_outage_without_cache_is_unavailable() {
    let moltbook = MockServer::start_async().await;
    let anthropic = MockServer::start_async().await;

    moltbook
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/posts");
            then.status(502);
        })
        .await;
    let classify = anthropic
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200);
        })
        .await;

    let config = config_for(&moltbook, &anthropic);
    let service = service_for(&config, Arc::new(MemoryStore::new()));

    let response = service.current_report().await;

    assert_eq!(classify.hits_async().await, 0);
    assert_eq!(response.status_code(), 500);
    let body = response.to_json().unwrap();
    assert_eq!(body["error"], "Failed to fetch weather");
    assert_eq!(body["weatherEmoji"], "❓");
    assert_eq!(body["insights"][0], "Unable to fetch mood data");
}
