//! headers/types.rs
//! Envelope types and the byte-order gate.

use std::fmt;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_enum::TryFromPrimitive;

use crate::constants::{message_types, ENDIAN_FLAG_BIG, ENDIAN_FLAG_LITTLE, HEADER_LEN};
use crate::types::{CodecError, Result};

/// Byte order of every multi-byte field in one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte-order gate: flag `1` selects little-endian, any other value big-endian.
    #[inline]
    pub const fn from_flag(flag: u8) -> Self {
        if flag == ENDIAN_FLAG_LITTLE {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            Endianness::Little => ENDIAN_FLAG_LITTLE,
            Endianness::Big => ENDIAN_FLAG_BIG,
        }
    }

    /// Caller guarantees `buf.len() >= 4`.
    #[inline]
    pub fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Endianness::Little => LittleEndian::read_i32(buf),
            Endianness::Big => BigEndian::read_i32(buf),
        }
    }

    /// Caller guarantees `buf.len() >= 8`.
    #[inline]
    pub fn read_f64(self, buf: &[u8]) -> f64 {
        match self {
            Endianness::Little => LittleEndian::read_f64(buf),
            Endianness::Big => BigEndian::read_f64(buf),
        }
    }

    #[inline]
    pub fn i32_bytes(self, v: i32) -> [u8; 4] {
        let mut out = [0u8; 4];
        match self {
            Endianness::Little => LittleEndian::write_i32(&mut out, v),
            Endianness::Big => BigEndian::write_i32(&mut out, v),
        }
        out
    }

    #[inline]
    pub fn f64_bytes(self, v: f64) -> [u8; 8] {
        let mut out = [0u8; 8];
        match self {
            Endianness::Little => LittleEndian::write_f64(&mut out, v),
            Endianness::Big => BigEndian::write_f64(&mut out, v),
        }
        out
    }
}

/// Message kinds carried in byte 3 of the envelope.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum MessageType {
    Set      = message_types::SET,
    Get      = message_types::GET,
    Response = message_types::RESPONSE,
}

impl MessageType {
    pub fn verify(raw: u8) -> Result<Self> {
        MessageType::try_from_primitive(raw).map_err(|_| CodecError::UnknownMessageType(raw))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Set => "set",
            MessageType::Get => "get",
            MessageType::Response => "response",
        }
    }
}

/// Parsed envelope.
///
/// `message_type` keeps the raw byte so that a message with an unexpected type
/// can still be decoded; use [`MessageHeader::kind`] for the strict view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub byte_order: Endianness,
    pub message_type: u8,
    /// Bytes following the envelope.
    pub payload_length: i32,
}

impl MessageHeader {
    pub const LEN: usize = HEADER_LEN;

    pub fn new(byte_order: Endianness, message_type: MessageType, payload_length: i32) -> Self {
        Self {
            byte_order,
            message_type: message_type as u8,
            payload_length,
        }
    }

    pub fn kind(&self) -> Result<MessageType> {
        MessageType::verify(self.message_type)
    }

    /// Payload length as a buffer size; negative lengths are rejected.
    pub fn payload_len(&self) -> Result<usize> {
        usize::try_from(self.payload_length)
            .map_err(|_| CodecError::InvalidPayloadLength(self.payload_length))
    }

    /// Total size of the framed message (envelope + payload).
    pub fn frame_len(&self) -> Result<usize> {
        Ok(Self::LEN + self.payload_len()?)
    }
}

impl fmt::Display for MessageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match MessageType::try_from_primitive(self.message_type) {
            Ok(t) => t.as_str().to_string(),
            Err(_) => format!("0x{:02x}", self.message_type),
        };
        write!(
            f,
            "{:?}-endian {} message, {} payload bytes",
            self.byte_order, kind, self.payload_length
        )
    }
}
