//! Prompt construction and best-effort parsing of the model's reply

use serde::Serialize;

use crate::error::{Error, Result};

/// Text used when the model returns JSON without a `text` field
pub const DEFAULT_REPLY_TEXT: &str = "Analysis complete.";

/// Narrated answer plus sonification values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelReply {
    pub text: String,
    pub data: Vec<serde_json::Number>,
}

/// Build the astrophysicist prompt around the user's transcript
pub fn build_prompt(transcript: &str) -> String {
    format!(
        "You are 'Astro-Brief', an expert astrophysicist. User Input: {transcript}\n\
         INSTRUCTIONS:\n\
         1. VISUALS: If an image is provided, explain it clearly in 2 sentences.\n\
         2. DATA: If the topic involves stats, generate 5-10 integers (0-100) for sonification.\n\
         3. FORMAT: You MUST return valid JSON. Example: {{\"text\": \"This is Jupiter...\", \"data\": [45, 88, 12]}}\n\
         If you cannot produce JSON, just provide the text explanation."
    )
}

/// Strip markdown code fences the model tends to wrap JSON in
fn strip_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a raw model reply.
///
/// A JSON object yields its `text` and numeric `data` entries. Text that is
/// not JSON is returned as-is with no data. JSON that is not an object is an
/// error so the caller moves on to the next model.
pub fn parse_reply(raw: &str) -> Result<ModelReply> {
    let cleaned = strip_fences(raw);

    let value: serde_json::Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(_) => {
            return Ok(ModelReply {
                text: cleaned,
                data: Vec::new(),
            });
        }
    };

    let serde_json::Value::Object(mut obj) = value else {
        return Err(Error::ReplyParse(format!(
            "expected a JSON object, got: {}",
            cleaned
        )));
    };

    let text = match obj.remove("text") {
        None => DEFAULT_REPLY_TEXT.to_string(),
        Some(serde_json::Value::String(s)) => s,
        // explicit null or non-string counts as no answer
        Some(_) => String::new(),
    };

    let data = match obj.remove("data") {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Number(n) => Some(n),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(ModelReply { text, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(reply: &ModelReply) -> Vec<i64> {
        reply.data.iter().filter_map(|n| n.as_i64()).collect()
    }

    #[test]
    fn test_build_prompt_embeds_transcript() {
        let prompt = build_prompt("How big is Jupiter?");
        assert!(prompt.starts_with(
            "You are 'Astro-Brief', an expert astrophysicist. User Input: How big is Jupiter?\nINSTRUCTIONS:\n"
        ));
        assert!(prompt.contains(r#"{"text": "This is Jupiter...", "data": [45, 88, 12]}"#));
        assert!(prompt.ends_with("If you cannot produce JSON, just provide the text explanation."));
    }

    #[test]
    fn test_parse_json_reply() {
        let reply = parse_reply(r#"{"text": "This is Jupiter.", "data": [45, 88, 12]}"#).unwrap();
        assert_eq!(reply.text, "This is Jupiter.");
        assert_eq!(numbers(&reply), vec![45, 88, 12]);
    }

    #[test]
    fn test_parse_fenced_json_reply() {
        let raw = "```json\n{\"text\": \"Saturn has rings.\", \"data\": [1, 2]}\n```\n";
        let reply = parse_reply(raw).unwrap();
        assert_eq!(reply.text, "Saturn has rings.");
        assert_eq!(numbers(&reply), vec![1, 2]);
    }

    #[test]
    fn test_parse_plain_text_reply() {
        let reply = parse_reply("  **Mars** is red because of iron oxide.  ").unwrap();
        assert_eq!(reply.text, "**Mars** is red because of iron oxide.");
        assert!(reply.data.is_empty());
    }

    #[test]
    fn test_missing_text_uses_default() {
        let reply = parse_reply(r#"{"data": [10]}"#).unwrap();
        assert_eq!(reply.text, DEFAULT_REPLY_TEXT);
        assert_eq!(numbers(&reply), vec![10]);
    }

    #[test]
    fn test_non_numeric_data_dropped() {
        let reply = parse_reply(r#"{"text": "ok", "data": [1, "two", null, 3.5]}"#).unwrap();
        assert_eq!(reply.data.len(), 2);
        assert_eq!(reply.data[1].as_f64(), Some(3.5));

        let reply = parse_reply(r#"{"text": "ok", "data": "none"}"#).unwrap();
        assert!(reply.data.is_empty());
    }

    #[test]
    fn test_non_string_text_is_empty() {
        let reply = parse_reply(r#"{"text": 42}"#).unwrap();
        assert!(reply.text.is_empty());
    }

    #[test]
    fn test_null_text_is_empty() {
        let reply = parse_reply(r#"{"text": null, "data": [1]}"#).unwrap();
        assert!(reply.text.is_empty());
        assert_eq!(numbers(&reply), vec![1]);
    }

    #[test]
    fn test_non_object_json_is_error() {
        assert!(matches!(parse_reply("[1, 2, 3]"), Err(Error::ReplyParse(_))));
        assert!(matches!(parse_reply("42"), Err(Error::ReplyParse(_))));
    }

    #[test]
    fn test_empty_reply() {
        let reply = parse_reply("```json\n```").unwrap();
        assert!(reply.text.is_empty());
    }
}
