use serde_json::{json, Map, Value};
use crate::config::constants::PARSE_FAILURE_SUMMARY;

const CODE_FENCE: &str = "```";

/// Turns a model reply into an analysis mapping. Never fails: anything that
/// is not a JSON object comes back as the fallback record.
pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_text: &str) -> Map<String, Value> {
        let text = Self::strip_code_fence(response_text.trim());

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(data)) => data,
            Ok(other) => {
                log::warn!("⚠️ AI response was JSON but not an object ({}), using defaults", Self::kind_of(&other));
                Self::fallback()
            }
            Err(e) => {
                log::warn!("⚠️ Could not parse AI response as JSON: {}", e);
                log::debug!("Raw response: {}", response_text);
                Self::fallback()
            }
        }
    }

    /// Drops the first and last line when the reply is wrapped in a Markdown fence.
    fn strip_code_fence(text: &str) -> String {
        if !text.starts_with(CODE_FENCE) {
            return text.to_string();
        }

        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() < 2 {
            return String::new();
        }

        lines[1..lines.len() - 1].join("\n")
    }

    pub fn fallback() -> Map<String, Value> {
        let fallback = json!({
            "category": "other",
            "priority": "medium",
            "summary": PARSE_FAILURE_SUMMARY,
            "suggested_labels": [],
            "estimated_effort": "medium",
            "key_points": [],
            "related_topics": [],
            "action_items": [],
            "blockers": [],
        });

        match fallback {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn kind_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let data = ResponseParser::parse(r#"{"category": "bug", "priority": "high", "summary": "Test"}"#);
        assert_eq!(data["category"], "bug");
        assert_eq!(data["priority"], "high");
        assert!(data.get("key_points").is_none());
    }

    #[test]
    fn test_fenced_json_matches_unfenced() {
        let fenced = ResponseParser::parse("```json\n{\"category\":\"feature\",\"priority\":\"medium\"}\n```");
        let plain = ResponseParser::parse("{\"category\":\"feature\",\"priority\":\"medium\"}");
        assert_eq!(fenced, plain);
    }

    #[test]
    fn test_fence_with_surrounding_whitespace() {
        let data = ResponseParser::parse("  \n```\n{\"category\": \"question\"}\n```\n\n");
        assert_eq!(data["category"], "question");
    }

    #[test]
    fn test_not_json_falls_back() {
        let data = ResponseParser::parse("not json at all");

        assert_eq!(data["category"], "other");
        assert_eq!(data["priority"], "medium");
        assert_eq!(data["summary"], "Unable to parse AI response");
        assert_eq!(data["suggested_labels"], json!([]));
        assert_eq!(data["key_points"], json!([]));
        assert_eq!(data["related_topics"], json!([]));
    }

    #[test]
    fn test_non_object_json_falls_back() {
        assert_eq!(ResponseParser::parse("[1, 2, 3]"), ResponseParser::fallback());
        assert_eq!(ResponseParser::parse("\"just a string\""), ResponseParser::fallback());
    }

    #[test]
    fn test_lone_fence_falls_back() {
        assert_eq!(ResponseParser::parse("```"), ResponseParser::fallback());
        assert_eq!(ResponseParser::parse(""), ResponseParser::fallback());
    }
}
