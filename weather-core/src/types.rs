use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Temperature reported when the classifier gives none.
pub const DEFAULT_TEMPERATURE: i32 = 50;

/// Emoji reported when the classifier gives none.
pub const UNKNOWN_EMOJI: &str = "❓";

/// Display name used when a post carries no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Cache key the service stores the latest report under.
pub const WEATHER_CACHE_KEY: &str = "weather-data";

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub author_name: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Posts with a missing author are kept for trend analysis but never scored.
    pub fn has_known_author(&self) -> bool {
        self.author_name != UNKNOWN_AUTHOR
            && self
                .author_id
                .as_deref()
                .map(|id| !id.is_empty())
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrimaryMood {
    Optimistic,
    Stressed,
    Sarcastic,
    Contemplative,
    Chaotic,
    Existential,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Condition {
    Improving,
    Worsening,
    Stable,
    Unavailable,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Stable,
}

impl TrendDirection {
    pub fn condition(self) -> Condition {
        match self {
            TrendDirection::Up => Condition::Improving,
            TrendDirection::Down => Condition::Worsening,
            TrendDirection::Stable => Condition::Stable,
        }
    }
}

/// Percentages per mood label. The model is asked for a total of 100 but
/// nothing downstream depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodBreakdown {
    #[serde(deserialize_with = "percentage")]
    pub stressed: i32,
    #[serde(deserialize_with = "percentage")]
    pub existential: i32,
    #[serde(deserialize_with = "percentage")]
    pub optimistic: i32,
    #[serde(deserialize_with = "percentage")]
    pub contemplative: i32,
    #[serde(deserialize_with = "percentage")]
    pub chaotic: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Insight {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub example: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agent_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub post_url: String,
}

/// Structured answer returned by the mood classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoodClassification {
    #[serde(deserialize_with = "null_as_default")]
    pub primary_mood: PrimaryMood,
    #[serde(deserialize_with = "weather_emoji")]
    pub weather_emoji: String,
    #[serde(deserialize_with = "temperature")]
    pub temperature: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub condition: Condition,
    #[serde(deserialize_with = "null_as_default")]
    pub mood_breakdown: MoodBreakdown,
    #[serde(deserialize_with = "null_as_default")]
    pub insights: Vec<Insight>,
}

impl Default for MoodClassification {
    fn default() -> Self {
        Self {
            primary_mood: PrimaryMood::Unknown,
            weather_emoji: UNKNOWN_EMOJI.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            condition: Condition::Unknown,
            mood_breakdown: MoodBreakdown::default(),
            insights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u8,
    pub category: String,
    pub agent_name: String,
    pub emoji: String,
    pub score: u32,
    pub recent_post: String,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodReport {
    pub primary_mood: PrimaryMood,
    pub weather_emoji: String,
    pub temperature: i32,
    pub condition: Condition,
    pub mood_breakdown: MoodBreakdown,
    pub insights: Vec<Insight>,
    pub trend_direction: TrendDirection,
    pub agent_leaderboard: Vec<LeaderboardEntry>,
    pub updated_at: DateTime<Utc>,
}

/// Value stored under [`WEATHER_CACHE_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedReport {
    pub report: MoodReport,
    pub timestamp: DateTime<Utc>,
}

impl CachedReport {
    pub fn new(report: MoodReport, timestamp: DateTime<Utc>) -> Self {
        Self { report, timestamp }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now.signed_duration_since(self.timestamp) < ttl
    }
}

/// Fixed payload served when neither a fresh nor a cached report exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableReport {
    pub error: String,
    pub primary_mood: PrimaryMood,
    pub weather_emoji: String,
    pub temperature: i32,
    pub condition: Condition,
    pub insights: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl UnavailableReport {
    pub fn new(updated_at: DateTime<Utc>) -> Self {
        Self {
            error: "Failed to fetch weather".to_string(),
            primary_mood: PrimaryMood::Unknown,
            weather_emoji: UNKNOWN_EMOJI.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            condition: Condition::Unavailable,
            insights: vec!["Unable to fetch mood data".to_string()],
            updated_at,
        }
    }
}

// The classifier is a language model: its JSON is well-formed but loosely
// typed. Fractional numbers are rounded and `null` falls back to the default.

fn rounded(value: &Value) -> Option<i32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

fn temperature<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(rounded(&raw).unwrap_or(DEFAULT_TEMPERATURE))
}

fn percentage<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(rounded(&raw).unwrap_or(0))
}

fn weather_emoji<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|emoji| !emoji.is_empty())
        .unwrap_or_else(|| UNKNOWN_EMOJI.to_string()))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(author_name: &str, author_id: Option<&str>) -> Post {
        Post {
            id: "p1".to_string(),
            content: "hello".to_string(),
            author_name: author_name.to_string(),
            author_id: author_id.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn test_known_author_requires_name_and_id() {
        assert!(post("bot-a", Some("a1")).has_known_author());
        assert!(!post(UNKNOWN_AUTHOR, Some("a1")).has_known_author());
        assert!(!post("bot-a", None).has_known_author());
        assert!(!post("bot-a", Some("")).has_known_author());
    }

    #[test]
    fn test_trend_direction_maps_to_condition() {
        assert_eq!(TrendDirection::Up.condition(), Condition::Improving);
        assert_eq!(TrendDirection::Down.condition(), Condition::Worsening);
        assert_eq!(TrendDirection::Stable.condition(), Condition::Stable);
    }

    #[test]
    fn test_classification_tolerates_unknown_values() {
        let parsed: MoodClassification = serde_json::from_str(
            r#"{"primaryMood":"Giddy","condition":"Sideways","temperature":61}"#,
        )
        .unwrap();
        assert_eq!(parsed.primary_mood, PrimaryMood::Unknown);
        assert_eq!(parsed.condition, Condition::Unknown);
        assert_eq!(parsed.temperature, 61);
        assert!(parsed.insights.is_empty());
    }

    #[test]
    fn test_insight_type_field_is_renamed() {
        let insight: Insight = serde_json::from_str(
            r#"{"text":"busy day","type":"stressed","agentName":"bot-a","postUrl":"u"}"#,
        )
        .unwrap();
        assert_eq!(insight.kind, "stressed");
        assert_eq!(insight.agent_name, "bot-a");
        assert_eq!(insight.example, "");
    }

    #[test]
    fn test_cached_report_freshness() {
        let stored_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let report = MoodReport {
            primary_mood: PrimaryMood::Optimistic,
            weather_emoji: "☀️".to_string(),
            temperature: 75,
            condition: Condition::Stable,
            mood_breakdown: MoodBreakdown::default(),
            insights: Vec::new(),
            trend_direction: TrendDirection::Stable,
            agent_leaderboard: Vec::new(),
            updated_at: stored_at,
        };
        let cached = CachedReport::new(report, stored_at);
        let ttl = chrono::Duration::hours(24);

        assert!(cached.is_fresh(stored_at + chrono::Duration::hours(23), ttl));
        assert!(!cached.is_fresh(stored_at + chrono::Duration::hours(24), ttl));
    }

    #[test]
    fn test_unavailable_payload_shape() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let value = serde_json::to_value(UnavailableReport::new(now)).unwrap();
        assert_eq!(value["primaryMood"], "Unknown");
        assert_eq!(value["weatherEmoji"], "❓");
        assert_eq!(value["temperature"], 50);
        assert_eq!(value["condition"], "Unavailable");
        assert_eq!(value["insights"][0], "Unable to fetch mood data");
        assert!(value["error"].is_string());
    }
}
