//! Serde helpers for loosely typed text fields
//!
//! Stored collections and extraction replies are not always well typed:
//! a phone number may arrive as a JSON number. Numbers and booleans are kept
//! as their text form; `null`, arrays and objects read as unset.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text field that is never absent; unusable values read as `""`
pub(crate) fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional text field; unusable values read as absent
pub(crate) fn optional_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_text))
}
