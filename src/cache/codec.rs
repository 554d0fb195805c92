//! Payload Codec Module
//!
//! Size estimation and the compression envelope for stored payloads.
//!
//! The envelope is a format marker: the payload is stored as its JSON text
//! under `{compressed: true, data: <json>}` with no entropy coding applied.
//! Every failure here degrades to a usable value instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// Multiplier applied to the in-memory size when serialization fails.
pub const FALLBACK_SIZE_MULTIPLIER: u64 = 16;

// == Compressed Envelope ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedEnvelope {
    pub compressed: bool,
    /// JSON text of the wrapped payload
    pub data: String,
}

// == Payload ==
/// A stored payload, either as-is or wrapped in the envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Plain(Value),
    Compressed(CompressedEnvelope),
}

impl Payload {
    pub fn is_compressed(&self) -> bool {
        matches!(self, Payload::Compressed(env) if env.compressed)
    }
}

// == Size Estimation ==
/// Estimates the stored size of `data` from its serialized length.
///
/// Falls back to a conservative multiple of the in-memory size when the
/// value cannot be serialized.
pub fn estimate_size<T: Serialize + ?Sized>(data: &T) -> u64 {
    match serde_json::to_vec(data) {
        Ok(bytes) => bytes.len() as u64,
        Err(e) => {
            let fallback = fallback_size(data);
            warn!(error = %e, fallback, "size estimation failed, using conservative estimate");
            fallback
        }
    }
}

fn fallback_size<T: ?Sized>(data: &T) -> u64 {
    (std::mem::size_of_val(data) as u64).max(1) * FALLBACK_SIZE_MULTIPLIER
}

// == Compress ==
/// Wraps `value` in the compression envelope, or leaves it plain on failure.
pub fn compress(value: Value) -> Payload {
    match try_compress(&value) {
        Ok(envelope) => Payload::Compressed(envelope),
        Err(e) => {
            warn!(error = %e, "compression failed, storing payload uncompressed");
            Payload::Plain(value)
        }
    }
}

fn try_compress(value: &Value) -> Result<CompressedEnvelope> {
    Ok(CompressedEnvelope {
        compressed: true,
        data: serde_json::to_string(value)?,
    })
}

// == Decompress ==
/// Unwraps a stored payload back into a JSON value.
///
/// Plain payloads and envelopes without the `compressed` marker pass through.
/// An envelope whose text fails to parse is returned as the envelope object.
pub fn decompress(payload: &Payload) -> Value {
    match payload {
        Payload::Plain(value) => value.clone(),
        Payload::Compressed(envelope) if envelope.compressed => {
            match serde_json::from_str(&envelope.data) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "decompression failed, returning stored envelope");
                    envelope_value(envelope)
                }
            }
        }
        Payload::Compressed(envelope) => envelope_value(envelope),
    }
}

fn envelope_value(envelope: &CompressedEnvelope) -> Value {
    serde_json::json!({
        "compressed": envelope.compressed,
        "data": envelope.data,
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_estimate_size_uses_serialized_length() {
        let value = json!({"v": 1});
        assert_eq!(estimate_size(&value), r#"{"v":1}"#.len() as u64);
    }

    #[test]
    fn test_estimate_size_falls_back_on_serialization_failure() {
        // Non-string map keys cannot be serialized to JSON
        let mut map: HashMap<(u8, u8), u8> = HashMap::new();
        map.insert((1, 2), 3);

        let expected = std::mem::size_of_val(&map) as u64 * FALLBACK_SIZE_MULTIPLIER;
        assert_eq!(estimate_size(&map), expected);
    }

    #[test]
    fn test_compress_produces_envelope() {
        let payload = compress(json!({"name": "leg day", "sets": [5, 5, 5]}));

        match &payload {
            Payload::Compressed(env) => {
                assert!(env.compressed);
                let parsed: Value = serde_json::from_str(&env.data).unwrap();
                assert_eq!(parsed["name"], "leg day");
            }
            Payload::Plain(_) => panic!("expected compressed payload"),
        }
        assert!(payload.is_compressed());
    }

    #[test]
    fn test_decompress_plain_passthrough() {
        let payload = Payload::Plain(json!([1, 2, 3]));
        assert_eq!(decompress(&payload), json!([1, 2, 3]));
        assert!(!payload.is_compressed());
    }

    #[test]
    fn test_decompress_without_marker_passthrough() {
        let payload = Payload::Compressed(CompressedEnvelope {
            compressed: false,
            data: "raw".to_string(),
        });
        assert_eq!(decompress(&payload), json!({"compressed": false, "data": "raw"}));
    }

    #[test]
    fn test_decompress_corrupt_envelope_degrades() {
        let payload = Payload::Compressed(CompressedEnvelope {
            compressed: true,
            data: "{not json".to_string(),
        });
        assert_eq!(decompress(&payload), json!({"compressed": true, "data": "{not json"}));
    }
}
