use crate::rules::{Dimension, DIMENSION_RULES};
use std::collections::HashMap;
use tracing::debug;
use weather_core::Post;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionScores([u32; 10]);

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> u32 {
        self.0[dimension.index()]
    }

    pub fn add(&mut self, other: &DimensionScores) {
        for (total, value) in self.0.iter_mut().zip(other.0) {
            *total += value;
        }
    }

    fn bump(&mut self, dimension: Dimension, amount: u32) {
        self.0[dimension.index()] += amount;
    }
}

/// Scores one piece of text against every keyword rule.
pub fn score_text(text: &str) -> DimensionScores {
    let lowered = text.to_lowercase();
    let mut scores = DimensionScores::default();

    for rule in DIMENSION_RULES.iter() {
        for pattern in &rule.patterns {
            let matches = pattern.regex.find_iter(&lowered).count() as u32;
            scores.bump(rule.dimension, matches * pattern.weight);
        }
    }

    scores
}

#[derive(Debug, Clone)]
pub struct AuthorScoreSheet {
    pub author_id: String,
    pub author_name: String,
    pub scores: DimensionScores,
    pub posts: Vec<Post>,
}

impl AuthorScoreSheet {
    fn new(author_id: String, author_name: String) -> Self {
        Self {
            author_id,
            author_name,
            scores: DimensionScores::default(),
            posts: Vec::new(),
        }
    }

    pub fn score(&self, dimension: Dimension) -> u32 {
        self.scores.get(dimension)
    }

    fn record(&mut self, post: &Post) {
        self.scores.add(&score_text(&post.content));
        self.posts.push(post.clone());
    }
}

/// Score sheets for one batch, kept in order of each author's first post.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    sheets: Vec<AuthorScoreSheet>,
    by_author_id: HashMap<String, usize>,
}

impl ScoreBoard {
    pub fn sheets(&self) -> &[AuthorScoreSheet] {
        &self.sheets
    }

    pub fn get(&self, author_id: &str) -> Option<&AuthorScoreSheet> {
        self.by_author_id.get(author_id).map(|&i| &self.sheets[i])
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheets sorted by one dimension, highest first. Ties keep first-seen order.
    pub fn ranked_by(&self, dimension: Dimension) -> Vec<&AuthorScoreSheet> {
        let mut ranked: Vec<&AuthorScoreSheet> = self.sheets.iter().collect();
        ranked.sort_by(|a, b| b.score(dimension).cmp(&a.score(dimension)));
        ranked
    }

    pub fn top_score(&self, dimension: Dimension) -> Option<u32> {
        self.sheets.iter().map(|sheet| sheet.score(dimension)).max()
    }

    fn sheet_for(&mut self, author_id: &str, author_name: &str) -> &mut AuthorScoreSheet {
        let index = match self.by_author_id.get(author_id) {
            Some(&index) => index,
            None => {
                self.sheets.push(AuthorScoreSheet::new(
                    author_id.to_string(),
                    author_name.to_string(),
                ));
                let index = self.sheets.len() - 1;
                self.by_author_id.insert(author_id.to_string(), index);
                index
            }
        };
        &mut self.sheets[index]
    }
}

/// Accumulates keyword scores per author id.
///
/// Posts without a known author are skipped here; they still count towards
/// the trend signal.
pub fn score_posts(posts: &[Post]) -> ScoreBoard {
    let mut board = ScoreBoard::default();

    for post in posts {
        if !post.has_known_author() {
            continue;
        }
        let Some(author_id) = post.author_id.as_deref() else {
            continue;
        };
        board.sheet_for(author_id, &post.author_name).record(post);
    }

    debug!(
        "Scored {} posts across {} authors",
        posts.len(),
        board.len()
    );
    board
}
