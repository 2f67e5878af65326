//! Behavior-rules payload parsing.
//!
//! Behavior rules arrive in several shapes depending on who wrote them:
//!
//! | Shape | Example |
//! |-------|---------|
//! | Array | `["Be polite", "Be brief"]` |
//! | Object | `{"rules": ["Be polite"]}` |
//! | JSON-encoded string of either | `"[\"Be polite\"]"` |
//! | Plain text | `Be polite` |
//!
//! Everything funnels through [`parse_behavior_rules`] /
//! [`behavior_rules_from_value`], which always produce a `Vec<String>` of
//! trimmed, non-blank rules and never fail.

use serde::Deserialize;
use serde_json::Value;

/// The structured payload shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RulesPayload {
    List(Vec<Value>),
    Wrapped { rules: Vec<Value> },
    Text(String),
}

/// Parse a raw behavior-rules string.
///
/// Text that is not JSON, or JSON of an unsupported shape, becomes a
/// single rule holding the trimmed raw text.
pub fn parse_behavior_rules(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<RulesPayload>(trimmed) {
        Ok(RulesPayload::List(items)) | Ok(RulesPayload::Wrapped { rules: items }) => {
            string_entries(&items)
        }
        // A JSON string literal: unwrap one level, no deeper.
        Ok(RulesPayload::Text(inner)) => match serde_json::from_str::<RulesPayload>(inner.trim()) {
            Ok(RulesPayload::List(items)) | Ok(RulesPayload::Wrapped { rules: items }) => {
                string_entries(&items)
            }
            _ => single(&inner),
        },
        Err(_) => single(trimmed),
    }
}

/// Interpret a stored JSON value as behavior rules.
///
/// Strings go through [`parse_behavior_rules`]; arrays and `{rules}`
/// objects keep their non-blank string entries. Anything else yields no
/// rules.
pub fn behavior_rules_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::String(raw) => parse_behavior_rules(raw),
        Value::Array(items) => string_entries(items),
        Value::Object(map) => match map.get("rules") {
            Some(Value::Array(items)) => string_entries(items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn string_entries(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn single(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json_array() {
        assert_eq!(
            parse_behavior_rules(r#"["Be polite", "  Be brief ", ""]"#),
            vec!["Be polite", "Be brief"]
        );
    }

    #[test]
    fn parses_rules_object() {
        assert_eq!(
            parse_behavior_rules(r#"{"rules": ["One", 2, null, "Two"]}"#),
            vec!["One", "Two"]
        );
    }

    #[test]
    fn plain_text_is_a_single_rule() {
        assert_eq!(parse_behavior_rules("Be polite"), vec!["Be polite"]);
    }

    #[test]
    fn malformed_json_is_a_single_rule() {
        assert_eq!(
            parse_behavior_rules(r#"["unterminated"#),
            vec![r#"["unterminated"#]
        );
    }

    #[test]
    fn unsupported_json_shape_is_the_raw_text() {
        assert_eq!(parse_behavior_rules("42"), vec!["42"]);
        assert_eq!(
            parse_behavior_rules(r#"{"other": 1}"#),
            vec![r#"{"other": 1}"#]
        );
    }

    #[test]
    fn json_encoded_array_inside_string() {
        assert_eq!(
            parse_behavior_rules(r#""[\"Nested rule\"]""#),
            vec!["Nested rule"]
        );
        assert_eq!(parse_behavior_rules(r#""just text""#), vec!["just text"]);
    }

    #[test]
    fn blank_input_has_no_rules() {
        assert!(parse_behavior_rules("   ").is_empty());
        assert!(parse_behavior_rules("[]").is_empty());
        assert!(parse_behavior_rules(r#""  ""#).is_empty());
    }

    #[test]
    fn value_shapes() {
        assert_eq!(behavior_rules_from_value(&json!(["a", " ", 3, "b"])), vec!["a", "b"]);
        assert_eq!(behavior_rules_from_value(&json!({"rules": ["c"]})), vec!["c"]);
        assert_eq!(behavior_rules_from_value(&json!("[\"d\"]")), vec!["d"]);
        assert!(behavior_rules_from_value(&json!({"rules": "e"})).is_empty());
        assert!(behavior_rules_from_value(&json!(null)).is_empty());
        assert!(behavior_rules_from_value(&json!(true)).is_empty());
    }
}
