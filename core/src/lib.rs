//! k3ipc-core
//!
//! Binary codec for the K3 inter-process protocol.
//! Pure functions over in-memory buffers; no sockets, no shared state.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;
pub mod value;

// Wire format
pub mod codec;
pub mod headers;

// Around the codec
pub mod io;
pub mod response;
pub mod telemetry;

pub use types::{CodecError, Result};
pub use value::{Dict, Value};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{bd, db, decode_message, encode_message, k3_msg};
    pub use crate::config::CodecConfig;
    pub use crate::headers::{Endianness, MessageHeader, MessageType};
    pub use crate::response::{build_query, K3Response};
    pub use crate::types::{CodecError, Result};
    pub use crate::value::{Dict, Value};
}
