//! Text extraction from chat responses of unknown shape.
//!
//! Providers and proxies disagree on where the reply text lives. The
//! extractor tries each known location in order and takes the first
//! non-empty string:
//!
//! 1. `content`
//! 2. `message.content`
//! 3. `choices[0].message.content`
//!
//! A bare JSON string is returned as-is. Anything else is pretty-printed.

use serde_json::Value;

/// A single extraction attempt.
type Strategy = fn(&Value) -> Option<&str>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("content", direct_content),
    ("message.content", message_content),
    ("choices[0].message.content", first_choice_content),
];

fn direct_content(v: &Value) -> Option<&str> {
    v.get("content")?.as_str()
}

fn message_content(v: &Value) -> Option<&str> {
    v.get("message")?.get("content")?.as_str()
}

fn first_choice_content(v: &Value) -> Option<&str> {
    v.get("choices")?.get(0)?.get("message")?.get("content")?.as_str()
}

/// Extract reply text from a response value.
///
/// # Examples
///
/// ```
/// use domscribe::extract::extract_text;
/// use serde_json::json;
///
/// assert_eq!(extract_text(&json!({"choices": [{"message": {"content": "X"}}]})), "X");
/// assert_eq!(extract_text(&json!("Y")), "Y");
/// assert_eq!(extract_text(&json!({})), "{}");
/// ```
pub fn extract_text(response: &Value) -> String {
    if let Some(text) = response.as_str() {
        return text.to_string();
    }

    for &(path, strategy) in STRATEGIES {
        if let Some(text) = strategy(response).filter(|t| !t.is_empty()) {
            tracing::trace!(path, "extracted response text");
            return text.to_string();
        }
    }

    serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direct_content_wins() {
        let v = json!({"content": "A", "message": {"content": "B"}});
        assert_eq!(extract_text(&v), "A");
    }

    #[test]
    fn nested_message_content() {
        let v = json!({"message": {"role": "assistant", "content": "B"}});
        assert_eq!(extract_text(&v), "B");
    }

    #[test]
    fn openai_choices_shape() {
        let v = json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "X"}}]
        });
        assert_eq!(extract_text(&v), "X");
    }

    #[test]
    fn empty_content_falls_through_to_next_strategy() {
        let v = json!({"content": "", "choices": [{"message": {"content": "C"}}]});
        assert_eq!(extract_text(&v), "C");
    }

    #[test]
    fn non_string_content_is_skipped() {
        let v = json!({"content": [1, 2], "message": {"content": "D"}});
        assert_eq!(extract_text(&v), "D");
    }

    #[test]
    fn bare_string_is_returned() {
        assert_eq!(extract_text(&json!("Y")), "Y");
        assert_eq!(extract_text(&json!("")), "");
    }

    #[test]
    fn unknown_shapes_are_stringified() {
        assert_eq!(extract_text(&json!({})), "{}");
        assert_eq!(extract_text(&json!(42)), "42");
        assert_eq!(extract_text(&json!(null)), "null");

        let v = json!({"choices": []});
        assert_eq!(extract_text(&v), "{\n  \"choices\": []\n}");
    }
}
