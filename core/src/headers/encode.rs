//! headers/encode.rs
//!
//! Envelope encoding and the in-place patch helpers used by the message builder.
//!
//! Design notes:
//! - The builder writes the envelope first with a zero length, encodes the
//!   payload, then patches bytes 4..8 once the payload size is known.
//! - The message type defaults to SET (0) and is patched by the caller.

use crate::constants::{HEADER_LEN, MESSAGE_TYPE_OFFSET, PAYLOAD_LEN_OFFSET};
use crate::headers::types::{Endianness, MessageHeader, MessageType};
use crate::types::{CodecError, Result};

/// Serialize a `MessageHeader` into its 8-byte wire form.
#[inline]
pub fn encode_message_header(h: &MessageHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0] = h.byte_order.flag();                      // 0      endian flag
    // 1..3 reserved, left zero
    out[MESSAGE_TYPE_OFFSET] = h.message_type;         // 3      message type
    out[PAYLOAD_LEN_OFFSET..HEADER_LEN]                // 4..8   payload length
        .copy_from_slice(&h.byte_order.i32_bytes(h.payload_length));
    out
}

/// Append an envelope with a zero payload length, to be patched later.
pub fn begin_message(buf: &mut Vec<u8>, order: Endianness) {
    let header = MessageHeader::new(order, MessageType::Set, 0);
    buf.extend_from_slice(&encode_message_header(&header));
}

/// Overwrite bytes 4..8 with `payload_length` in the message's byte order.
pub fn patch_payload_length(buf: &mut [u8], payload_length: usize) -> Result<()> {
    ensure_envelope(buf)?;
    let len = i32::try_from(payload_length).map_err(|_| CodecError::PayloadTooLarge {
        len: payload_length,
        max: i32::MAX as usize,
    })?;
    let order = Endianness::from_flag(buf[0]);
    buf[PAYLOAD_LEN_OFFSET..HEADER_LEN].copy_from_slice(&order.i32_bytes(len));
    Ok(())
}

/// Tag an already-built message as SET, GET or RESPONSE.
pub fn set_message_type(buf: &mut [u8], message_type: MessageType) -> Result<()> {
    ensure_envelope(buf)?;
    buf[MESSAGE_TYPE_OFFSET] = message_type as u8;
    Ok(())
}

fn ensure_envelope(buf: &[u8]) -> Result<()> {
    if buf.len() < HEADER_LEN {
        return Err(CodecError::TruncatedInput {
            offset: 0,
            need: HEADER_LEN,
            have: buf.len(),
        });
    }
    Ok(())
}
