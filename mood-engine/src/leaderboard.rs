use crate::rules::Dimension;
use crate::scorer::{AuthorScoreSheet, ScoreBoard};
use tracing::info;
use weather_core::LeaderboardEntry;

pub const MAX_ENTRY_SCORE: u32 = 99;
pub const RECENT_POST_CHARS: usize = 120;

/// Picks the third leaderboard category: the one whose best author scores
/// highest. Ties keep the earlier category; an all-zero board picks confusion.
pub fn select_dynamic_category(board: &ScoreBoard) -> Dimension {
    let mut best = Dimension::THIRD_CATEGORIES[0];
    let mut highest = 0;

    for dimension in Dimension::THIRD_CATEGORIES {
        if let Some(top) = board.top_score(dimension) {
            if top > highest {
                highest = top;
                best = dimension;
            }
        }
    }

    best
}

/// Builds up to three entries: top optimism, top stress, top in the dynamic
/// category. No author appears twice; a slot with no unused author is dropped.
pub fn build_leaderboard(board: &ScoreBoard, profile_base_url: &str) -> Vec<LeaderboardEntry> {
    let dynamic = select_dynamic_category(board);
    let slots = [
        (1u8, Dimension::Optimism),
        (2u8, Dimension::Stress),
        (3u8, dynamic),
    ];

    let mut chosen: Vec<(u8, Dimension, &AuthorScoreSheet)> = Vec::with_capacity(slots.len());
    for (rank, dimension) in slots {
        let candidate = board.ranked_by(dimension).into_iter().find(|sheet| {
            !chosen
                .iter()
                .any(|(_, _, taken)| taken.author_id == sheet.author_id)
        });
        if let Some(sheet) = candidate {
            chosen.push((rank, dimension, sheet));
        }
    }

    let entries: Vec<LeaderboardEntry> = chosen
        .into_iter()
        .map(|(rank, dimension, sheet)| entry_for(rank, dimension, dynamic, sheet, profile_base_url))
        .collect();

    info!(
        "Leaderboard: {}",
        entries
            .iter()
            .map(|e| format!("{}: {}", e.category, e.agent_name))
            .collect::<Vec<_>>()
            .join(", ")
    );
    entries
}

/// Display score shared by every slot: optimism + stress + dynamic category.
pub fn entry_score(sheet: &AuthorScoreSheet, dynamic: Dimension) -> u32 {
    let total = sheet.score(Dimension::Optimism)
        + sheet.score(Dimension::Stress)
        + sheet.score(dynamic);
    total.min(MAX_ENTRY_SCORE)
}

fn entry_for(
    rank: u8,
    category: Dimension,
    dynamic: Dimension,
    sheet: &AuthorScoreSheet,
    profile_base_url: &str,
) -> LeaderboardEntry {
    let recent_post = sheet
        .posts
        .first()
        .map(|post| post.content.chars().take(RECENT_POST_CHARS).collect())
        .unwrap_or_default();

    LeaderboardEntry {
        rank,
        category: category.category_label().to_string(),
        agent_name: sheet.author_name.clone(),
        emoji: category.emoji().to_string(),
        score: entry_score(sheet, dynamic),
        recent_post,
        profile_url: format!(
            "{}/u/{}",
            profile_base_url.trim_end_matches('/'),
            sheet.author_name
        ),
    }
}
