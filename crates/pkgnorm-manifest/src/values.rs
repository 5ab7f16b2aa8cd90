//! Shape helpers for loosely typed manifest values.
//!
//! Manifests in the wild put numbers where strings belong and strings where
//! lists belong. These helpers accept the tolerable variants and describe the
//! rest in an error message naming the shape found.

use serde_json::Value;

/// Outcome of a field mapper; the message becomes a shape error
pub type MapResult = Result<(), String>;

/// Describe the JSON type of a value for error messages
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Check if a value carries nothing worth mapping
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Read a scalar as trimmed text; blank text reads as `None`
pub fn text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        },
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!("expected a string, found {}", kind(other))),
    }
}

/// Read a scalar as text, keeping non-blank strings untouched
pub fn raw_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(Some(s.clone())),
        other => text(other),
    }
}

/// Read a list of strings, accepting a single string as a one-item list
pub fn text_list(value: &Value) -> Result<Vec<String>, String> {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Some(s) = text(item)? {
                    out.push(s);
                }
            }
            Ok(out)
        },
        other => Ok(text(other)?.into_iter().collect()),
    }
}

/// Get an optional text member of an object
pub fn member(value: &Value, key: &str) -> Result<Option<String>, String> {
    match value.get(key) {
        Some(v) => text(v).map_err(|e| format!("'{}' {}", key, e)),
        None => Ok(None),
    }
}
