//! Header normalization.
//!
//! Captures deliver headers either as an ordered list of `{name, value}`
//! objects or as a flat name→value map. Both shapes collapse to an ordered
//! list here; the map form loses the original wire ordering, which is
//! accepted.

use serde_json::Value;

/// One request or response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Normalize either header shape into an ordered list.
///
/// Any other shape, and absence, yield an empty list.
pub fn normalize(value: Option<&Value>) -> Vec<Header> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| Header {
                name: member(item, "name"),
                value: member(item, "value"),
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, value)| Header {
                name: name.clone(),
                value: stringify(value),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn member(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::Null) | None => String::new(),
        Some(value) => stringify(value),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
