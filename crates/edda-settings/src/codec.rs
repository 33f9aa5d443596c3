//! Setting value encoding
//!
//! Values are persisted as strings with a versioned JSON envelope:
//! `json.v1:` followed by compact JSON. Decoding is deliberately
//! infallible: stores deployed before the envelope existed hold bare JSON
//! or plain strings, and those must keep reading back as values, never as
//! errors.

use serde_json::Value;

/// Envelope marker for the current encoding version
pub const ENVELOPE_PREFIX: &str = "json.v1:";

/// Encode a value for the persistent store
pub fn encode(value: &Value) -> String {
    // Display for Value is compact JSON and cannot fail
    format!("{ENVELOPE_PREFIX}{value}")
}

/// Decode a stored string back into a value
///
/// Tries, in order: the versioned envelope, a legacy bare-JSON payload,
/// and finally the raw string itself. Never fails.
pub fn decode(raw: &str) -> Value {
    if let Some(body) = raw.strip_prefix(ENVELOPE_PREFIX) {
        if let Ok(value) = serde_json::from_str(body) {
            return value;
        }
    }

    if let Ok(value) = serde_json::from_str(raw) {
        return value;
    }

    Value::String(raw.to_string())
}
