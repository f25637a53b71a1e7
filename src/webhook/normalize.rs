//! Reply normalization — heterogeneous webhook body → one reply string.
//!
//! DESIGN
//! ======
//! The webhook may answer with a JSON array of objects, a single JSON object,
//! or plain text. `ReplyPayload::decode` classifies the body once, and each
//! variant looks up its reply independently so the branches can be tested in
//! isolation. Pure functions only; no I/O.

use serde_json::{Map, Value};

use super::types::DeliveryError;

/// Fields tried on the first element of an array payload, in order.
const BATCH_FIELDS: &[&str] = &["output", "reply", "response"];

/// Fields tried on a single-object payload, in order.
const SINGLE_FIELDS: &[&str] = &["output", "reply", "response", "text"];

// =============================================================================
// PAYLOAD
// =============================================================================

/// A webhook body classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPayload {
    /// A non-empty JSON array; only the first element is consulted.
    Batch(Vec<Value>),
    /// A JSON object.
    Single(Map<String, Value>),
    /// A body that is not valid JSON, treated as `{output: <text>}`.
    RawText(String),
    /// Valid JSON of any other shape (scalar, `null`, empty array).
    Other(Value),
}

impl ReplyPayload {
    /// Classify a raw response body.
    #[must_use]
    pub fn decode(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Array(items)) if !items.is_empty() => Self::Batch(items),
            Ok(Value::Object(map)) => Self::Single(map),
            Ok(other) => Self::Other(other),
            Err(_) => Self::RawText(body.to_owned()),
        }
    }

    /// The normalized reply, or `None` when no expected field is present.
    #[must_use]
    pub fn reply(&self) -> Option<String> {
        match self {
            Self::Batch(items) => items
                .first()
                .and_then(Value::as_object)
                .and_then(|first| first_present(first, BATCH_FIELDS)),
            Self::Single(map) => first_present(map, SINGLE_FIELDS),
            Self::RawText(text) => (!text.is_empty()).then(|| text.clone()),
            Self::Other(_) => None,
        }
    }
}

/// Decode and normalize a body in one step.
///
/// # Errors
///
/// Returns [`DeliveryError::UnrecognizedPayload`] when no reply field matched.
pub fn normalize_reply(body: &str) -> Result<String, DeliveryError> {
    ReplyPayload::decode(body)
        .reply()
        .ok_or(DeliveryError::UnrecognizedPayload)
}

// =============================================================================
// FIELD LOOKUP
// =============================================================================

fn first_present(map: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| map.get(*field).and_then(present_text))
}

/// A field counts as present when it holds a non-empty string, a non-zero
/// number, `true`, or any object/array. Objects and arrays render as JSON;
/// integral floats drop their fraction (`1.0` → `"1"`).
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
