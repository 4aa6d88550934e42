//! Lenient field access for loosely-typed JSON objects.
//!
//! Both the persisted document and request payloads are plain JSON objects
//! whose fields may carry the wrong type. Text fields are coerced the same
//! way everywhere: strings pass through, numbers and booleans are rendered,
//! anything else counts as absent.

use serde_json::{Map, Value};

/// Read `key` from `object` as text, trimmed. Empty strings count as absent.
pub fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    let raw = match object.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

/// Read `key` as a list of strings. Non-string elements are skipped; a
/// missing or non-array field yields `None`.
pub fn string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = object.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

/// Truncate `value` to at most `max` characters.
pub fn cap_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
