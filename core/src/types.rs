//! types.rs
//! Unified codec error.
//!
//! - Every decode/encode/framing path returns `Result<T, CodecError>`.
//! - Errors are fatal to the message being processed; the format has no
//!   resync markers, so callers drop the message (and usually the stream).

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// A field declares more bytes than the buffer holds.
    #[error("truncated input at offset {offset}: need {need} bytes, have {have}")]
    TruncatedInput { offset: usize, need: usize, have: usize },

    /// Type tag outside the supported protocol subset.
    #[error("unsupported type tag: {0}")]
    UnsupportedType(i32),

    /// Value shape the encoder cannot express on the wire.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Count field of a vector/list/dict chunk is negative.
    #[error("invalid count {count} for tag {tag}")]
    InvalidCount { tag: i32, count: i32 },

    /// Envelope declares a negative payload length.
    #[error("invalid payload length: {0}")]
    InvalidPayloadLength(i32),

    /// Symbol bytes are not valid UTF-8.
    #[error("invalid symbol text at offset {offset}")]
    InvalidSymbol { offset: usize },

    /// Dict entry that is not a `[symbol; value; attributes]` list.
    #[error("malformed dict entry {index}: {reason}")]
    InvalidDictEntry { index: usize, reason: String },

    /// Message-type byte is not SET, GET or RESPONSE.
    #[error("unknown message type: {0}")]
    UnknownMessageType(u8),

    #[error("payload too large: {len} > {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("nesting deeper than {max}")]
    DepthExceeded { max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
