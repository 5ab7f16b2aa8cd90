//! Asserted license values.
//!
//! License fields come as a plain string or a list of choices. Legacy npm
//! manifests also use `{type, url}` objects. The value is passed through as
//! asserted text; it is never interpreted as an expression here.

use serde_json::Value;

/// The shapes a license field is found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseValue {
    Text(String),
    List(Vec<String>),
    /// Any other shape, kept as its JSON text
    Other(String),
}

/// Flatten a legacy `{type, url}` license object
fn object_parts(value: &Value) -> Vec<String> {
    ["type", "url"]
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect list entries; `convert` renders the non-string items
fn list_entries(items: &[Value], convert: impl Fn(&Value) -> Vec<String>) -> Vec<String> {
    let mut entries = Vec::new();
    for item in items {
        match item {
            Value::String(s) if !s.trim().is_empty() => entries.push(s.trim().to_string()),
            Value::Null | Value::String(_) => {},
            other => entries.extend(convert(other)),
        }
    }
    entries
}

impl LicenseValue {
    /// Read a license field; shapes other than text and lists of text are
    /// kept as their JSON text
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => LicenseValue::Text(s.trim().to_string()),
            Value::Array(items) => LicenseValue::List(list_entries(items, |item| vec![item.to_string()])),
            Value::Null => LicenseValue::Other(String::new()),
            other => LicenseValue::Other(other.to_string()),
        }
    }

    /// Read a license field that may hold legacy `{type, url}` objects
    pub fn from_legacy_value(value: &Value) -> Self {
        let flatten = |item: &Value| match item {
            Value::Object(_) if !object_parts(item).is_empty() => object_parts(item),
            other => vec![other.to_string()],
        };
        match value {
            Value::Array(items) => LicenseValue::List(list_entries(items, flatten)),
            Value::Object(_) => LicenseValue::List(flatten(value)),
            other => Self::from_value(other),
        }
    }

    /// Join into asserted license text; `None` when nothing was declared
    pub fn join(&self, separator: &str) -> Option<String> {
        let joined = match self {
            LicenseValue::Text(text) | LicenseValue::Other(text) => text.clone(),
            LicenseValue::List(entries) => entries.join(separator),
        };
        (!joined.is_empty()).then_some(joined)
    }
}
