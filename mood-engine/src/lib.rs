pub mod aggregator;
pub mod leaderboard;
pub mod rules;
pub mod scorer;
pub mod trend;

pub use aggregator::aggregate;
pub use leaderboard::{build_leaderboard, select_dynamic_category};
pub use rules::Dimension;
pub use scorer::{score_posts, score_text, AuthorScoreSheet, DimensionScores, ScoreBoard};
pub use trend::{compute_trend, positivity, TrendSignal};

use weather_core::{LeaderboardEntry, Post};

/// Everything the keyword heuristics derive from one batch.
#[derive(Debug, Clone)]
pub struct HeuristicAnalysis {
    pub trend: TrendSignal,
    pub board: ScoreBoard,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl HeuristicAnalysis {
    pub fn run(posts: &[Post], profile_base_url: &str) -> Self {
        let trend = compute_trend(posts);
        let board = score_posts(posts);
        let leaderboard = build_leaderboard(&board, profile_base_url);
        Self {
            trend,
            board,
            leaderboard,
        }
    }
}
