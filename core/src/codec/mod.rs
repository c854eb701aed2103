//! Chunk codec for K3 values.
//!
//! Responsibilities:
//! - Parse and write chunk headers (tag + optional count)
//! - Decode chunks into `Value`s, honouring list alignment
//! - Encode `Value`s into chunks and build framed messages
//!
//! Non-responsibilities:
//! - Sockets, retries, timeouts (see `io` for plain `Read`/`Write` framing)

pub mod chunk;
pub mod cursor;
pub mod decode;
pub mod encode;

pub use chunk::{read_chunk_header, write_chunk_header, ChunkHeader, TypeTag};
pub use cursor::{ChunkReader, ChunkWriter};
pub use decode::{db, decode_message, decode_message_with, decode_value, decode_value_with};
pub use encode::{bd, encode_message, encode_message_with, encode_value, encode_value_with, k3_msg};
