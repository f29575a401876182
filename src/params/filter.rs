//! Whitelist filtering of call arguments

use super::query::{QueryParams, QueryValue};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;

/// Serialize an options struct (or any map-like value) into candidate arguments
///
/// `null` serializes to an empty candidate set. Anything that is not an
/// object is rejected since it has no parameter names.
pub fn to_candidates<T: Serialize + ?Sized>(options: &T) -> Result<JsonObject> {
    match serde_json::to_value(options)? {
        JsonValue::Object(map) => Ok(map),
        JsonValue::Null => Ok(JsonObject::new()),
        other => Err(Error::invalid_value(
            "params",
            format!("expected an object of named parameters, got {other}"),
        )),
    }
}

/// Keep only whitelisted candidates
///
/// Candidate keys are trimmed before comparison and the output uses the
/// trimmed key. `null` values count as absent. Keys outside the whitelist
/// are dropped silently; when two keys trim to the same name the later one
/// in candidate order wins.
pub fn filter(candidates: &JsonObject, whitelist: &[&str]) -> JsonObject {
    let mut kept = JsonObject::new();
    for (key, value) in candidates {
        let key = key.trim();
        if value.is_null() || !whitelist.contains(&key) {
            continue;
        }
        kept.insert(key.to_string(), value.clone());
    }
    kept
}

/// Build query parameters for an endpoint
///
/// Output follows whitelist order. Keys listed in `array_params` are
/// rewritten to `key[]` with the value passed through unchanged.
pub fn query_params(
    candidates: &JsonObject,
    whitelist: &[&str],
    array_params: &[&str],
) -> QueryParams {
    let kept = filter(candidates, whitelist);
    let mut params = QueryParams::new();

    for name in whitelist {
        let Some(value) = kept.get(*name).and_then(QueryValue::from_json) else {
            continue;
        };
        if array_params.contains(name) {
            params.set(format!("{name}[]"), value);
        } else {
            params.set(*name, value);
        }
    }

    params
}

/// Build the JSON body for an endpoint
///
/// Endpoints that declare no body parameters get `None`; otherwise the
/// filtered object is returned even when empty.
pub fn body_params(candidates: &JsonObject, whitelist: &[&str]) -> Option<JsonValue> {
    if whitelist.is_empty() {
        return None;
    }
    Some(JsonValue::Object(filter(candidates, whitelist)))
}
