use crate::rules::{NEGATIVE_WORDS, POSITIVE_WORDS};
use tracing::debug;
use weather_core::{Post, TrendDirection};

/// Fewer timestamped posts than this and the trend is reported as stable.
pub const MIN_TREND_POSTS: usize = 11;

/// Positivity swing between the first and last third needed to call a trend.
pub const TREND_THRESHOLD: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSignal {
    pub direction: TrendDirection,
    pub sample_size: usize,
    pub early_positivity: i64,
    pub recent_positivity: i64,
}

impl TrendSignal {
    pub fn is_conclusive(&self) -> bool {
        self.sample_size >= MIN_TREND_POSTS
    }
}

/// Positive keyword matches minus negative keyword matches, summed.
pub fn positivity(posts: &[&Post]) -> i64 {
    posts
        .iter()
        .map(|post| {
            let positive = POSITIVE_WORDS.find_iter(&post.content).count() as i64;
            let negative = NEGATIVE_WORDS.find_iter(&post.content).count() as i64;
            positive - negative
        })
        .sum()
}

pub fn direction_for(early: i64, recent: i64) -> TrendDirection {
    if recent > early + TREND_THRESHOLD {
        TrendDirection::Up
    } else if recent < early - TREND_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Compares the positivity of the oldest and newest thirds of the batch.
pub fn compute_trend(posts: &[Post]) -> TrendSignal {
    let mut timed: Vec<&Post> = posts.iter().filter(|p| p.created_at.is_some()).collect();
    timed.sort_by_key(|p| p.created_at);

    let sample_size = timed.len();
    if sample_size < MIN_TREND_POSTS {
        debug!("Only {} timestamped posts, trend is stable", sample_size);
        return TrendSignal {
            direction: TrendDirection::Stable,
            sample_size,
            early_positivity: 0,
            recent_positivity: 0,
        };
    }

    let third = sample_size / 3;
    let early_positivity = positivity(&timed[..third]);
    let recent_positivity = positivity(&timed[sample_size - third..]);
    let direction = direction_for(early_positivity, recent_positivity);

    debug!(
        "Trend over {} posts: early={} recent={} -> {:?}",
        sample_size, early_positivity, recent_positivity, direction
    );

    TrendSignal {
        direction,
        sample_size,
        early_positivity,
        recent_positivity,
    }
}
