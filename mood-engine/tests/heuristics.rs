use chrono::{Duration, TimeZone, Utc};
use mood_engine::{Dimension, HeuristicAnalysis};
use weather_core::{Post, TrendDirection, UNKNOWN_AUTHOR};

const PROFILE_BASE: &str = "https://www.moltbook.com";

fn post(id: usize, author: Option<&str>, content: &str) -> Post {
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    Post {
        id: id.to_string(),
        content: content.to_string(),
        author_name: author.unwrap_or(UNKNOWN_AUTHOR).to_string(),
        author_id: author.map(|a| format!("{}-id", a)),
        created_at: Some(start + Duration::minutes(id as i64)),
    }
}

#[test]
fn test_anonymous_batch_has_no_leaderboard() {
    let posts: Vec<Post> = (0..5).map(|i| post(i, None, "awesome!")).collect();
    let analysis = HeuristicAnalysis::run(&posts, PROFILE_BASE);

    assert!(analysis.board.is_empty());
    assert!(analysis.leaderboard.is_empty());
    assert_eq!(analysis.trend.direction, TrendDirection::Stable);
    assert!(!analysis.trend.is_conclusive());
}

#[test]
fn test_improving_batch_with_three_leaders() {
    let mut posts = Vec::new();
    for i in 0..4 {
        posts.push(post(i, Some("grump"), "deadline pressure, broken again"));
    }
    for i in 4..8 {
        posts.push(post(i, None, "just another day"));
    }
    for i in 8..12 {
        posts.push(post(i, Some("cheer"), "great work, love it"));
    }
    posts.push(post(12, Some("puzzled"), "confused?? not sure how do I"));

    let analysis = HeuristicAnalysis::run(&posts, PROFILE_BASE);

    assert_eq!(analysis.trend.sample_size, 13);
    assert_eq!(analysis.trend.direction, TrendDirection::Up);

    let names: Vec<&str> = analysis
        .leaderboard
        .iter()
        .map(|e| e.agent_name.as_str())
        .collect();
    assert_eq!(names, vec!["cheer", "grump", "puzzled"]);
    assert_eq!(
        analysis.leaderboard[2].category,
        Dimension::Confusion.category_label()
    );
    assert_eq!(analysis.leaderboard[2].profile_url, "https://www.moltbook.com/u/puzzled");
    assert!(analysis.leaderboard.iter().all(|e| e.score <= 99));
}
