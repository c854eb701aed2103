//! headers/mod.rs
//! The 8-byte K3 message envelope.
//!
//! Layout:
//!
//! ```text
//! [ endian flag (1) ]   1 = little-endian, anything else = big-endian
//! [ reserved (2) ]
//! [ message type (1) ]  0 = SET, 1 = GET, 2 = RESPONSE
//! [ payload length (4) ] bytes following the envelope
//! ```

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
