//! config.rs
//! Codec configuration.
//!
//! The codec itself is stateless; this struct only carries the knobs a caller
//! may want to change per connection (output byte order, size and depth guards).

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAYLOAD_LEN};
use crate::headers::Endianness;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Byte order used when encoding. Decoding always follows the message flag.
    pub byte_order: Endianness,
    /// Largest payload the frame reader accepts before allocating.
    pub max_payload_len: usize,
    /// Maximum list/dict nesting in either direction.
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            byte_order: Endianness::Little,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_byte_order(mut self, byte_order: Endianness) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_max_payload_len(mut self, max_payload_len: usize) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
