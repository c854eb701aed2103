//! telemetry/snapshot.rs
//! Immutable, serializable view of `CodecCounters`.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::CodecCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecSnapshot {
    pub messages_decoded: u64,
    pub messages_encoded: u64,
    pub bytes_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_padding: u64,
    pub chunks_decoded: u64,
    pub chunks_encoded: u64,
    /// Padding bytes over all bytes moved through the codec.
    pub padding_ratio: f64,
}

impl CodecSnapshot {
    pub fn from(counters: &CodecCounters) -> Self {
        let moved = counters.bytes_decoded + counters.bytes_encoded;
        let padding_ratio = if moved > 0 {
            counters.bytes_padding as f64 / moved as f64
        } else {
            0.0
        };

        Self {
            messages_decoded: counters.messages_decoded,
            messages_encoded: counters.messages_encoded,
            bytes_decoded: counters.bytes_decoded,
            bytes_encoded: counters.bytes_encoded,
            bytes_padding: counters.bytes_padding,
            chunks_decoded: counters.chunks_decoded.total(),
            chunks_encoded: counters.chunks_encoded.total(),
            padding_ratio,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Padding can never exceed the bytes it was counted in.
    pub fn sanity_check(&self) -> bool {
        self.bytes_padding <= self.bytes_decoded + self.bytes_encoded
            && self.padding_ratio <= 1.0
    }
}
