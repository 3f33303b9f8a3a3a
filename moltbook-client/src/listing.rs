//! Tolerant decoding of Moltbook post listings.
//!
//! The posts endpoint has answered with a bare array, an object wrapping the
//! array under `posts`, and an object wrapping it under `data`. Everything is
//! funnelled through [`normalize_listing`] before individual posts are decoded,
//! and individual posts are decoded leniently so one odd entry never fails a
//! whole batch.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};
use weather_core::{Post, UNKNOWN_AUTHOR};

/// Unwraps a listing response into its array of posts.
///
/// Fallback order: bare array, then `posts`, then `data`, then empty.
pub fn normalize_listing(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for field in ["posts", "data"] {
                if let Some(Value::Array(items)) = map.remove(field) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPost {
    pub id: Value,
    pub content: Option<String>,
    pub title: Option<String>,
    pub author: Value,
    pub created_at: Value,
}

impl RawPost {
    pub fn post_id(&self) -> Option<String> {
        scalar_to_string(&self.id)
    }

    fn into_post(self, id: String) -> Post {
        let content = self
            .content
            .filter(|c| !c.is_empty())
            .or(self.title)
            .unwrap_or_default();

        let author_name = self
            .author
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_string();
        let author_id = self.author.get("id").and_then(scalar_to_string);

        Post {
            id,
            content,
            author_name,
            author_id,
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts RFC 3339, a zone-less ISO timestamp (taken as UTC) or epoch seconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| Utc.from_utc_datetime(&naive))
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

/// Concatenates both samples, keeps one post per id and caps the result.
///
/// A repeated id keeps the slot of its first occurrence but takes the fields
/// of its last occurrence.
pub fn merge_samples(hot: Vec<Value>, new: Vec<Value>, cap: usize) -> Vec<Post> {
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, RawPost> = HashMap::new();

    for value in hot.into_iter().chain(new) {
        let raw: RawPost = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping undecodable post: {}", e);
                continue;
            }
        };

        let Some(id) = raw.post_id() else {
            debug!("Skipping post without id");
            continue;
        };

        if latest.insert(id.clone(), raw).is_none() {
            order.push(id);
        }
    }

    order
        .into_iter()
        .take(cap)
        .filter_map(|id| latest.remove(&id).map(|raw| raw.into_post(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_listing_shapes() {
        assert_eq!(normalize_listing(json!([{"id": 1}])).len(), 1);
        assert_eq!(
            normalize_listing(json!({"posts": [{"id": 1}, {"id": 2}]})).len(),
            2
        );
        assert_eq!(normalize_listing(json!({"data": [{"id": 1}]})).len(), 1);
        assert!(normalize_listing(json!({"success": false})).is_empty());
        assert!(normalize_listing(json!("nope")).is_empty());
        assert!(normalize_listing(Value::Null).is_empty());
    }

    #[test]
    fn test_posts_field_wins_over_data() {
        let listing = normalize_listing(json!({
            "posts": [{"id": "from-posts"}],
            "data": [{"id": "a"}, {"id": "b"}]
        }));
        assert_eq!(listing, vec![json!({"id": "from-posts"})]);
    }

    #[test]
    fn test_non_array_posts_falls_back_to_data() {
        let listing = normalize_listing(json!({
            "posts": {"count": 2},
            "data": [{"id": "a"}]
        }));
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn test_post_normalization_fallbacks() {
        let posts = merge_samples(
            vec![json!({
                "id": 42,
                "title": "Title only",
                "created_at": "2026-01-01T10:00:00Z"
            })],
            vec![json!({
                "id": "abc",
                "content": "",
                "title": "Empty content falls back",
                "author": {"id": "u1", "name": "bot-a"}
            })],
            50,
        );

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "42");
        assert_eq!(posts[0].content, "Title only");
        assert_eq!(posts[0].author_name, UNKNOWN_AUTHOR);
        assert_eq!(posts[0].author_id, None);
        assert!(posts[0].created_at.is_some());

        assert_eq!(posts[1].content, "Empty content falls back");
        assert_eq!(posts[1].author_name, "bot-a");
        assert_eq!(posts[1].author_id.as_deref(), Some("u1"));
        assert_eq!(posts[1].created_at, None);
    }

    #[test]
    fn test_duplicate_id_keeps_one_entry_with_latest_fields() {
        let posts = merge_samples(
            vec![json!({
                "id": 1,
                "content": "This is awesome! Great job!!",
                "author": {"id": "a", "name": "bot-a"}
            })],
            vec![json!({"id": 1, "content": "duplicate, ignored"})],
            50,
        );

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[0].content, "duplicate, ignored");
        assert_eq!(posts[0].author_name, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_duplicate_keeps_first_position() {
        let posts = merge_samples(
            vec![json!({"id": "a"}), json!({"id": "b"})],
            vec![json!({"id": "c"}), json!({"id": "a", "content": "late"})],
            50,
        );
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(posts[0].content, "late");
    }

    #[test]
    fn test_merge_caps_after_dedup() {
        let hot: Vec<Value> = (0..30).map(|i| json!({"id": i})).collect();
        let new: Vec<Value> = (15..45).map(|i| json!({"id": i})).collect();
        let posts = merge_samples(hot, new, 40);

        assert_eq!(posts.len(), 40);
        let mut ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 40);
    }

    #[test]
    fn test_merge_skips_posts_without_id_or_shape() {
        let posts = merge_samples(
            vec![json!({"content": "no id"}), json!("not an object")],
            vec![json!({"id": null}), json!({"id": "ok"})],
            50,
        );
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "ok");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp(&json!("2026-02-03T04:05:06.789+02:00")).is_some());
        assert!(parse_timestamp(&json!("2026-02-03T04:05:06.789")).is_some());
        assert_eq!(
            parse_timestamp(&json!(1_700_000_000)),
            Utc.timestamp_opt(1_700_000_000, 0).single()
        );
        assert_eq!(parse_timestamp(&json!("yesterday")), None);
        assert_eq!(parse_timestamp(&Value::Null), None);
    }
}
