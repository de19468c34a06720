//! Response shape normalization
//!
//! The backend answers either with a bare value or with an envelope
//! `{ "data": ... }` (sometimes next to `success`/`message` keys).

use serde_json::Value;

/// Shape a list response arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    Bare,
    Enveloped,
    Unrecognized,
}

/// Extract the record sequence from a list response
///
/// A bare array or an object whose `data` field is an array yields its
/// elements; any other shape yields an empty sequence.
pub fn unwrap_list(body: Value) -> (Vec<Value>, ListShape) {
    match body {
        Value::Array(items) => (items, ListShape::Bare),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => (items, ListShape::Enveloped),
            _ => (Vec::new(), ListShape::Unrecognized),
        },
        _ => (Vec::new(), ListShape::Unrecognized),
    }
}

/// Extract a single record from a response
///
/// `{ "data": { ... } }` unwraps to the inner object; anything else is
/// returned as is.
pub fn unwrap_one(body: Value) -> Value {
    match body {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// The `message` field of an error body, if any
pub fn error_message(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
