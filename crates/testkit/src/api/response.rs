//! The uniform response envelope

use once_cell::sync::Lazy;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};

static EMPTY_OBJECT: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// Parsed response body: JSON when the body parses as JSON, otherwise
/// the raw text.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Text(String),
}

/// Transport-level leftovers of a completed call, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub url: String,
}

/// Normalized result of one HTTP call.
///
/// `success` is derived purely from the status-code class (2xx); the
/// body is never consulted, because endpoints embed their own ok/error
/// markers inconsistently.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Payload,
    pub success: bool,
    pub raw: RawResponse,
}

impl ApiResponse {
    pub(crate) fn new(status: u16, data: Payload, raw: RawResponse) -> Self {
        Self {
            status,
            data,
            success: (200..300).contains(&status),
            raw,
        }
    }

    /// The body as a JSON object, or an empty object when the body is
    /// not a mapping. Safe to chain on error responses.
    pub fn json(&self) -> &Map<String, Value> {
        match &self.data {
            Payload::Json(Value::Object(map)) => map,
            _ => &EMPTY_OBJECT,
        }
    }

    /// The conventional `data` member of the body, if present.
    pub fn body_data(&self) -> Option<&Value> {
        self.json().get("data")
    }

    /// Look up a field inside the body's `data` member.
    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.body_data()?.get(key)
    }

    /// Body rendered for failure messages.
    pub fn error_text(&self) -> String {
        match &self.data {
            Payload::Json(value) => value.to_string(),
            Payload::Text(text) => text.clone(),
        }
    }
}
