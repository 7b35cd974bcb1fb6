//! Recursive masking of sensitive fields before logging
//!
//! Any key whose lowercased form contains one of the sensitive keywords
//! gets its value replaced with a fixed mask. The walk is total:
//! nested objects and arrays are masked at any depth.

use serde_json::Value;

const MASK: &str = "********";

const SENSITIVE_KEYWORDS: &[&str] = &[
    "password",
    "secret",
    "token",
    "accesstoken",
    "refreshtoken",
    "key",
    "credential",
    "pass",
    "pwd",
    "api_key",
    "apikey",
];

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEYWORDS.iter().any(|kw| key.contains(kw))
}

/// Return a copy of `value` with every sensitive field masked.
pub fn mask_sensitive(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| {
                    if is_sensitive(key) {
                        (key.clone(), Value::String(MASK.to_string()))
                    } else {
                        (key.clone(), mask_sensitive(inner))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(mask_sensitive).collect()),
        other => other.clone(),
    }
}
