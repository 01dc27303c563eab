//! Decoding of raw webhook bodies into event envelopes.
//!
//! The transport layer hands the body over as raw bytes, never pre-parsed.
//! Decoding happens exactly once per request; the resulting envelope is
//! passed through to kind extraction and the hooks.

use serde_json::{Map, Value};
use thiserror::Error;

/// Well-known payload key that classifies the event.
pub const EVENT_KIND_KEY: &str = "object_kind";

/// Event kind assumed when the payload carries no usable classifier.
pub const DEFAULT_EVENT_KIND: &str = "push";

/// Reasons a request body failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The body is not valid JSON.
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The body parsed, but the top-level value is not an object.
    #[error("top-level JSON value is not an object")]
    NotAnObject,
}

/// A decoded webhook payload plus its derived event kind.
///
/// The kind is extracted from [`EVENT_KIND_KEY`] at decode time and is
/// always non-empty: an absent or non-string value falls back to
/// [`DEFAULT_EVENT_KIND`]. Envelopes are created fresh per request and
/// never persisted.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    kind: String,
    payload: Map<String, Value>,
}

impl EventEnvelope {
    /// Decodes a raw request body into an envelope.
    ///
    /// The body must be UTF-8 text containing a single top-level JSON
    /// object.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the bytes are not UTF-8, not JSON, or
    /// the parsed value is not an object.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(raw)?;
        let value: Value = serde_json::from_str(text)?;

        let Value::Object(payload) = value else {
            return Err(DecodeError::NotAnObject);
        };

        // The kind invariant: always non-empty, so dispatch never sees a
        // blank classifier.
        let kind = payload
            .get(EVENT_KIND_KEY)
            .and_then(Value::as_str)
            .filter(|kind| !kind.is_empty())
            .unwrap_or(DEFAULT_EVENT_KIND)
            .to_owned();

        Ok(Self { kind, payload })
    }

    /// The event kind classifier, e.g. `"push"` or `"issue"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The decoded top-level payload object.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Looks up a top-level payload field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_extracts_declared_kind() {
        let envelope = EventEnvelope::decode(br#"{"object_kind": "issue", "x": 1}"#).unwrap();
        assert_eq!(envelope.kind(), "issue");
        assert_eq!(envelope.get("x"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn decode_defaults_kind_when_key_absent() {
        let envelope = EventEnvelope::decode(br#"{"commits": []}"#).unwrap();
        assert_eq!(envelope.kind(), DEFAULT_EVENT_KIND);
    }

    #[test]
    fn decode_defaults_kind_when_value_not_a_string() {
        let envelope = EventEnvelope::decode(br#"{"object_kind": 7}"#).unwrap();
        assert_eq!(envelope.kind(), "push");

        let envelope = EventEnvelope::decode(br#"{"object_kind": null}"#).unwrap();
        assert_eq!(envelope.kind(), "push");
    }

    #[test]
    fn decode_defaults_kind_when_value_is_empty() {
        let envelope = EventEnvelope::decode(br#"{"object_kind": ""}"#).unwrap();
        assert_eq!(envelope.kind(), "push");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = EventEnvelope::decode(&[0xff, 0xfe, b'{']).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUtf8(_)));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = EventEnvelope::decode(b"not json").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn decode_rejects_non_object_top_level() {
        let err = EventEnvelope::decode(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));

        let err = EventEnvelope::decode(br#""push""#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));
    }
}
