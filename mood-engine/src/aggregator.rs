use crate::trend::TrendSignal;
use chrono::{DateTime, Utc};
use weather_core::{LeaderboardEntry, MoodClassification, MoodReport, TrendDirection};

/// Folds the heuristic results into the classifier's answer.
///
/// A conclusive trend overrides the classifier's `condition`; otherwise the
/// trend is reported as stable and the classifier's condition stands.
pub fn aggregate(
    classification: MoodClassification,
    trend: &TrendSignal,
    leaderboard: Vec<LeaderboardEntry>,
    updated_at: DateTime<Utc>,
) -> MoodReport {
    let (trend_direction, condition) = if trend.is_conclusive() {
        (trend.direction, trend.direction.condition())
    } else {
        (TrendDirection::Stable, classification.condition)
    };

    MoodReport {
        primary_mood: classification.primary_mood,
        weather_emoji: classification.weather_emoji,
        temperature: classification.temperature,
        condition,
        mood_breakdown: classification.mood_breakdown,
        insights: classification.insights,
        trend_direction,
        agent_leaderboard: leaderboard,
        updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use weather_core::{Condition, PrimaryMood};

    fn classification(condition: Condition) -> MoodClassification {
        MoodClassification {
            primary_mood: PrimaryMood::Existential,
            weather_emoji: "🌥️".to_string(),
            temperature: 62,
            condition,
            ..MoodClassification::default()
        }
    }

    fn signal(direction: TrendDirection, sample_size: usize) -> TrendSignal {
        TrendSignal {
            direction,
            sample_size,
            early_positivity: 0,
            recent_positivity: 0,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_conclusive_trend_overrides_condition() {
        let report = aggregate(
            classification(Condition::Stable),
            &signal(TrendDirection::Down, 30),
            Vec::new(),
            now(),
        );
        assert_eq!(report.trend_direction, TrendDirection::Down);
        assert_eq!(report.condition, Condition::Worsening);

        let report = aggregate(
            classification(Condition::Worsening),
            &signal(TrendDirection::Up, 30),
            Vec::new(),
            now(),
        );
        assert_eq!(report.condition, Condition::Improving);
    }

    #[test]
    fn test_inconclusive_trend_keeps_classifier_condition() {
        let report = aggregate(
            classification(Condition::Worsening),
            &signal(TrendDirection::Stable, 4),
            Vec::new(),
            now(),
        );
        assert_eq!(report.trend_direction, TrendDirection::Stable);
        assert_eq!(report.condition, Condition::Worsening);
    }

    #[test]
    fn test_report_carries_classifier_fields_and_timestamp() {
        let entry = LeaderboardEntry {
            rank: 1,
            category: "Most Optimistic".to_string(),
            agent_name: "bot-a".to_string(),
            emoji: "☀️".to_string(),
            score: 42,
            recent_post: "hello".to_string(),
            profile_url: "https://www.moltbook.com/u/bot-a".to_string(),
        };
        let report = aggregate(
            classification(Condition::Stable),
            &signal(TrendDirection::Stable, 0),
            vec![entry.clone()],
            now(),
        );

        assert_eq!(report.primary_mood, PrimaryMood::Existential);
        assert_eq!(report.temperature, 62);
        assert_eq!(report.agent_leaderboard, vec![entry]);
        assert_eq!(report.updated_at, now());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["trendDirection"], "stable");
        assert_eq!(value["agentLeaderboard"][0]["agentName"], "bot-a");
    }
}
