use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use weather_core::{ClassifierError, MoodClassification};

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new("```json\n?").expect("fence pattern compiles"));

/// Strips code fences and surrounding prose from a model answer.
///
/// When the answer opens with a fence, every fence marker is removed. The
/// span from the first `{` to the last `}` is then taken if there is one.
pub fn extract_json_block(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    if text.starts_with("```") {
        text = JSON_FENCE
            .replace_all(&text, "")
            .replace("```", "")
            .trim()
            .to_string();
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => text[start..=end].to_string(),
        _ => text,
    }
}

pub fn parse_classification(raw: &str) -> Result<MoodClassification, ClassifierError> {
    let json = extract_json_block(raw);
    debug!(
        "Classifier answer preview: {}",
        json.chars().take(100).collect::<String>()
    );

    serde_json::from_str(&json).map_err(|e| {
        warn!("Classifier answer is not valid JSON: {}", e);
        ClassifierError::Parse {
            details: e.to_string(),
        }
    })
}
