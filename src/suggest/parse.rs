//! Tolerant decoding of model replies.
//!
//! Models wrap JSON in prose or Markdown fences often enough that a strict parse
//! is not useful. Candidate JSON texts are tried in order: the whole reply, the
//! first fenced block, the outermost `{...}` span, then the outermost `[...]` span.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::error::{SuggestError, SuggestResult};
use super::types::{Suggestion, SuggestionBatch, parse_product_uid};

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("fence pattern is valid")
});

/// Extracts the first parseable JSON value from `text`.
pub fn extract_json(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    if let Some(inner) = FENCED_BLOCK.captures(text).and_then(|c| c.get(1))
        && let Ok(value) = serde_json::from_str(inner.as_str().trim())
    {
        return Some(value);
    }

    span_between(text, '{', '}')
        .and_then(|span| serde_json::from_str(span).ok())
        .or_else(|| span_between(text, '[', ']').and_then(|span| serde_json::from_str(span).ok()))
}

fn span_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Parses a model reply into a [`SuggestionBatch`].
///
/// Accepts an object keyed by `"PROD_<n>"`, or an array whose elements carry a
/// `"uid"` field (elements without one take their array position). Entries that
/// do not fit the [`Suggestion`] shape are skipped.
pub fn parse_suggestions(text: &str) -> SuggestResult<SuggestionBatch> {
    let value = extract_json(text).ok_or_else(|| SuggestError::MalformedResponse {
        reason: "no JSON value found in reply".to_string(),
    })?;
    batch_from_value(value)
}

/// Converts an already-decoded reply into a [`SuggestionBatch`].
pub fn batch_from_value(value: Value) -> SuggestResult<SuggestionBatch> {
    let mut batch = SuggestionBatch::new();

    match value {
        Value::Object(map) => {
            for (uid, entry) in map {
                let Some(position) = parse_product_uid(&uid) else {
                    debug!(uid = %uid, "Skipping entry with unrecognized key");
                    continue;
                };
                if let Some(suggestion) = decode_entry(&uid, entry) {
                    batch.insert(position, suggestion);
                }
            }
        }
        Value::Array(entries) => {
            for (i, entry) in entries.into_iter().enumerate() {
                let position = entry
                    .get("uid")
                    .and_then(Value::as_str)
                    .and_then(parse_product_uid)
                    .unwrap_or(i);
                if let Some(suggestion) = decode_entry(&position.to_string(), entry) {
                    batch.insert(position, suggestion);
                }
            }
        }
        other => {
            return Err(SuggestError::MalformedResponse {
                reason: format!("expected an object or array, got {}", json_kind(&other)),
            });
        }
    }

    Ok(batch)
}

fn decode_entry(uid: &str, entry: Value) -> Option<Suggestion> {
    match serde_json::from_value(entry) {
        Ok(suggestion) => Some(suggestion),
        Err(e) => {
            debug!(uid, error = %e, "Skipping malformed suggestion entry");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
