//! headers/decode.rs
//!
//! Envelope parsing.
//!
//! Design notes:
//! - Only the first 8 bytes are inspected; the caller reads `payload_length`
//!   more bytes off the transport before handing the frame to the decoder.
//! - Reserved bytes are ignored, not validated.
//! - The message type is kept raw; see `MessageHeader::kind`.

use tracing::trace;

use crate::constants::{HEADER_LEN, MESSAGE_TYPE_OFFSET, PAYLOAD_LEN_OFFSET};
use crate::headers::types::{Endianness, MessageHeader};
use crate::types::{CodecError, Result};

#[inline]
pub fn parse_message_header(buf: &[u8]) -> Result<MessageHeader> {
    if buf.len() < HEADER_LEN {
        return Err(CodecError::TruncatedInput {
            offset: 0,
            need: HEADER_LEN,
            have: buf.len(),
        });
    }

    let byte_order = Endianness::from_flag(buf[0]);
    let message_type = buf[MESSAGE_TYPE_OFFSET];
    let payload_length = byte_order.read_i32(&buf[PAYLOAD_LEN_OFFSET..HEADER_LEN]);

    let header = MessageHeader { byte_order, message_type, payload_length };
    trace!(%header, "parsed message header");
    Ok(header)
}
