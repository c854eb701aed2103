//! codec/chunk.rs
//! Chunk type tags and the chunk header parser.
//!
//! A chunk starts with a signed 4-byte tag. LIST (0), the negative
//! vector tags and DICT carry a 4-byte element count after it; every other
//! positive tag is fixed-shape.

use num_enum::TryFromPrimitive;

use crate::codec::cursor::{ChunkReader, ChunkWriter};
use crate::constants::tags;
use crate::types::{CodecError, Result};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum TypeTag {
    List         = tags::LIST,
    Int          = tags::INT,
    Float        = tags::FLOAT,
    Char         = tags::CHAR,
    Symbol       = tags::SYMBOL,
    Dict         = tags::DICT,
    Null         = tags::NULL,
    Function     = tags::FUNCTION,
    CharString   = tags::STRING,
    SymbolVector = tags::SYMBOL_VECTOR,
}

impl TypeTag {
    /// Map a raw tag, rejecting anything outside the table.
    pub fn verify(raw: i32) -> Result<Self> {
        TypeTag::try_from_primitive(raw).map_err(|_| CodecError::UnsupportedType(raw))
    }

    pub fn is_vector(self) -> bool {
        (self as i32) < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub type_tag: i32,
    /// Present iff `type_tag <= 0` or `type_tag == DICT`.
    pub count: Option<i32>,
}

impl ChunkHeader {
    pub fn has_count(type_tag: i32) -> bool {
        type_tag <= 0 || type_tag == tags::DICT
    }

    pub fn scalar(type_tag: i32) -> Self {
        Self { type_tag, count: None }
    }

    pub fn counted(type_tag: i32, count: i32) -> Self {
        Self { type_tag, count: Some(count) }
    }

    /// Bytes this header occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        if self.count.is_some() { 8 } else { 4 }
    }

    /// Element count as a length; zero for fixed-shape chunks and for a
    /// negative count (which `read_chunk_header` never produces).
    pub fn len(&self) -> usize {
        self.count.and_then(|c| usize::try_from(c).ok()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read one chunk header. Negative counts are rejected so `len()` is safe.
pub fn read_chunk_header(r: &mut ChunkReader<'_>) -> Result<ChunkHeader> {
    let type_tag = r.read_i32()?;
    if !ChunkHeader::has_count(type_tag) {
        return Ok(ChunkHeader::scalar(type_tag));
    }
    let count = r.read_i32()?;
    if count < 0 {
        return Err(CodecError::InvalidCount { tag: type_tag, count });
    }
    Ok(ChunkHeader::counted(type_tag, count))
}

pub fn write_chunk_header(w: &mut ChunkWriter<'_>, h: &ChunkHeader) -> usize {
    w.put_i32(h.type_tag);
    if let Some(count) = h.count {
        w.put_i32(count);
    }
    h.encoded_len()
}
