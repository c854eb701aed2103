//! constants.rs
//! Wire constants for the K3 IPC envelope and chunk layouts.
//!
//! Notes:
//! - Tags are signed 4-byte codes; a negated CHAR or SYMBOL tag denotes a
//!   vector of that scalar.
//! - Every multi-byte field follows the byte order chosen by the first byte
//!   of the message.

/// Fixed envelope length: flag, 2 reserved bytes, message type, payload length.
pub const HEADER_LEN: usize = 8;

/// Offset of the message-type byte inside the envelope.
pub const MESSAGE_TYPE_OFFSET: usize = 3;

/// Offset of the 4-byte payload length inside the envelope.
pub const PAYLOAD_LEN_OFFSET: usize = 4;

/// Elements inside a list (and dict entries) end on this boundary.
pub const ALIGNMENT: usize = 8;

/// Endian flag selecting little-endian. Any other value means big-endian.
pub const ENDIAN_FLAG_LITTLE: u8 = 1;

/// Flag written when the encoder is asked for big-endian output.
pub const ENDIAN_FLAG_BIG: u8 = 0;

/// Value of the 4-byte field that sits between a FLOAT tag and its payload.
pub const FLOAT_PAD: i32 = 1;

/// Upper bound for a single framed payload accepted by the frame reader (64 MiB).
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 64 * 1024 * 1024;

/// Default nesting limit for lists and dicts.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Chunk type tags (mirrored by `codec::TypeTag`).
pub mod tags {
    pub const LIST: i32     = 0;
    pub const INT: i32      = 1;
    pub const FLOAT: i32    = 2;
    pub const CHAR: i32     = 3;
    pub const SYMBOL: i32   = 4;
    pub const DICT: i32     = 5;
    pub const NULL: i32     = 6;
    pub const FUNCTION: i32 = 7;

    pub const STRING: i32        = -CHAR;
    pub const SYMBOL_VECTOR: i32 = -SYMBOL;
}

/// Message type identifiers (byte 3 of the envelope).
pub mod message_types {
    pub const SET: u8      = 0;
    pub const GET: u8      = 1;
    pub const RESPONSE: u8 = 2;
}

/// Response codes carried as the first element of a GET reply.
pub mod response_codes {
    pub const OK: i32    = 0;
    pub const ERROR: i32 = 1;
}
