//! Static keyword tables for the heuristic scorer and the trend signal.
//!
//! Every dimension is a list of `(pattern, weight)` pairs. A pattern adds its
//! weight once per non-overlapping match in the lower-cased post text.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Optimism,
    Stress,
    Confusion,
    Kindness,
    Creativity,
    Productivity,
    Tiredness,
    Euphoria,
    Encouragement,
    Skepticism,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Optimism,
        Dimension::Stress,
        Dimension::Confusion,
        Dimension::Kindness,
        Dimension::Creativity,
        Dimension::Productivity,
        Dimension::Tiredness,
        Dimension::Euphoria,
        Dimension::Encouragement,
        Dimension::Skepticism,
    ];

    /// Candidates for the leaderboard's third slot, in tie-break order.
    pub const THIRD_CATEGORIES: [Dimension; 8] = [
        Dimension::Confusion,
        Dimension::Kindness,
        Dimension::Creativity,
        Dimension::Productivity,
        Dimension::Tiredness,
        Dimension::Euphoria,
        Dimension::Encouragement,
        Dimension::Skepticism,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn category_label(self) -> &'static str {
        match self {
            Dimension::Optimism => "Most Optimistic",
            Dimension::Stress => "Most Stressed",
            Dimension::Confusion => "Most Confused",
            Dimension::Kindness => "Kindest",
            Dimension::Creativity => "Most Creative",
            Dimension::Productivity => "Most Productive",
            Dimension::Tiredness => "Most Tired",
            Dimension::Euphoria => "Most Euphoric",
            Dimension::Encouragement => "Most Encouraging",
            Dimension::Skepticism => "Most Skeptical",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Dimension::Optimism => "☀️",
            Dimension::Stress => "😰",
            Dimension::Confusion => "🤔",
            Dimension::Kindness => "💝",
            Dimension::Creativity => "🎨",
            Dimension::Productivity => "⚡",
            Dimension::Tiredness => "😴",
            Dimension::Euphoria => "🎉",
            Dimension::Encouragement => "🌟",
            Dimension::Skepticism => "🤨",
        }
    }
}

const KEYWORD_TABLE: &[(Dimension, &[(&str, u32)])] = &[
    (
        Dimension::Optimism,
        &[
            ("!", 3),
            (
                "great|awesome|amazing|love|yes|perfect|excellent|happy|excited|wonderful",
                10,
            ),
        ],
    ),
    (
        Dimension::Stress,
        &[(
            "stress|urgent|pressure|deadline|bug|broken|error|fail|help|overwhelm",
            10,
        )],
    ),
    (
        Dimension::Confusion,
        &[
            (
                "confused|don't understand|not sure|unclear|what does|how do|why is",
                10,
            ),
            (r"\?\?", 5),
        ],
    ),
    (
        Dimension::Kindness,
        &[(
            "thank|appreciate|grateful|kind|help|support|care|together",
            10,
        )],
    ),
    (
        Dimension::Creativity,
        &[("create|build|design|imagine|innovate|idea|invent|art", 10)],
    ),
    (
        Dimension::Productivity,
        &[(
            "shipped|deployed|completed|finished|done|built|accomplished",
            10,
        )],
    ),
    (
        Dimension::Tiredness,
        &[("tired|exhausted|burned out|drained|fatigue|sleep", 10)],
    ),
    (
        Dimension::Euphoria,
        &[(
            "amazing|incredible|best|perfect|love this|finally|yes!!|wow",
            10,
        )],
    ),
    (
        Dimension::Encouragement,
        &[(
            "you can|keep going|don't give up|believe|you got this|great job",
            15,
        )],
    ),
    (
        Dimension::Skepticism,
        &[(
            r"doubt|skeptical|unsure|questionable|really\?|hmm|suspicious",
            10,
        )],
    ),
];

#[derive(Debug)]
pub struct WeightedPattern {
    pub regex: Regex,
    pub weight: u32,
}

#[derive(Debug)]
pub struct DimensionRule {
    pub dimension: Dimension,
    pub patterns: Vec<WeightedPattern>,
}

pub static DIMENSION_RULES: Lazy<Vec<DimensionRule>> = Lazy::new(|| {
    KEYWORD_TABLE
        .iter()
        .map(|(dimension, patterns)| DimensionRule {
            dimension: *dimension,
            patterns: patterns
                .iter()
                .map(|(pattern, weight)| WeightedPattern {
                    regex: Regex::new(pattern).expect("keyword pattern compiles"),
                    weight: *weight,
                })
                .collect(),
        })
        .collect()
});

pub static POSITIVE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(?i)great|awesome|love|yes|perfect|good|amazing|excellent")
        .expect("positive pattern compiles")
});

pub static NEGATIVE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(?i)bad|terrible|awful|no|hate|wrong|fail|broken|stress")
        .expect("negative pattern compiles")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_dimension_once() {
        assert_eq!(DIMENSION_RULES.len(), Dimension::ALL.len());
        for (rule, dimension) in DIMENSION_RULES.iter().zip(Dimension::ALL) {
            assert_eq!(rule.dimension, dimension);
            assert!(!rule.patterns.is_empty());
        }
    }

    #[test]
    fn test_index_matches_position() {
        for (position, dimension) in Dimension::ALL.iter().enumerate() {
            assert_eq!(dimension.index(), position);
        }
    }

    #[test]
    fn test_third_categories_exclude_fixed_slots() {
        assert!(!Dimension::THIRD_CATEGORIES.contains(&Dimension::Optimism));
        assert!(!Dimension::THIRD_CATEGORIES.contains(&Dimension::Stress));
    }

    #[test]
    fn test_trend_words_are_case_insensitive() {
        assert_eq!(POSITIVE_WORDS.find_iter("GREAT and Good").count(), 2);
        assert_eq!(NEGATIVE_WORDS.find_iter("Broken, BAD").count(), 2);
    }
}
