//! Parsed API responses

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// A successful response with its JSON body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    headers: HeaderMap,
    body: JsonValue,
}

impl ApiResponse {
    /// Create a response from parts
    pub fn new(status: u16, headers: HeaderMap, body: JsonValue) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Placeholder returned for writes skipped in simulate mode
    pub fn simulated() -> Self {
        Self::new(StatusCode::OK.as_u16(), HeaderMap::new(), JsonValue::Null)
    }

    /// Build a response from a raw body
    ///
    /// An empty body (e.g. `204 No Content` after a DELETE) yields `null`
    /// instead of a parse error.
    pub fn from_bytes(status: u16, headers: HeaderMap, bytes: &[u8]) -> Result<Self> {
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            JsonValue::Null
        } else {
            serde_json::from_slice(bytes)?
        };

        Ok(Self::new(status, headers, body))
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Parsed body
    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    /// Whether the body was empty
    pub fn is_empty(&self) -> bool {
        self.body.is_null()
    }

    /// Take the parsed body
    pub fn into_body(self) -> JsonValue {
        self.body
    }

    /// Deserialize the body into a typed value
    pub fn json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.body).map_err(Error::from)
    }
}

/// Human-readable message for an error response body
///
/// The Dashboard API reports failures as `{"errors": ["..."]}`; other shapes
/// fall back to a `message` field, the raw text, or the status reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<JsonValue>(body) {
        if let Some(errors) = json.get("errors").and_then(JsonValue::as_array) {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| match e {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            if !messages.is_empty() {
                return messages.join("; ");
            }
        }
        if let Some(message) = json.get("message").and_then(JsonValue::as_str) {
            return message.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    } else {
        body.to_string()
    }
}
