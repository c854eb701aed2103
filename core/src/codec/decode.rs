//! codec/decode.rs
//!
//! Value decoder (`Db`).
//!
//! Design notes:
//! - Recursive descent over a `ChunkReader`; the reader owns the position and
//!   the message byte order.
//! - `inside_list` marks list elements. After such an element the reader skips
//!   padding until the bytes consumed since the element's tag reach a multiple
//!   of 8. That one rule yields the per-kind skips of the wire format (3 after
//!   a char, `count + 1` rounded up after a string, and so on) and also covers
//!   the trailing 4 bytes of a NULL chunk and the tail of a symbol vector.
//! - A standalone top-level chunk is never realigned.

use tracing::{debug, trace};

use crate::codec::chunk::{read_chunk_header, TypeTag};
use crate::codec::cursor::ChunkReader;
use crate::config::CodecConfig;
use crate::constants::HEADER_LEN;
use crate::headers::{parse_message_header, MessageHeader};
use crate::telemetry::CodecCounters;
use crate::types::{CodecError, Result};
use crate::value::{Dict, Value};

/// Decode a complete framed message into its value.
pub fn db(buf: &[u8]) -> Result<Value> {
    decode_message(buf).map(|(_, v)| v)
}

/// Decode a complete framed message, returning its envelope too.
pub fn decode_message(buf: &[u8]) -> Result<(MessageHeader, Value)> {
    let mut counters = CodecCounters::default();
    decode_message_with(buf, &CodecConfig::default(), &mut counters)
}

/// Decode a complete framed message, recording into `counters`.
///
/// Bytes past `8 + payload_length` are ignored; a buffer shorter than that is
/// `TruncatedInput`. `counters` is only updated when the message decodes.
pub fn decode_message_with(
    buf: &[u8],
    config: &CodecConfig,
    counters: &mut CodecCounters,
) -> Result<(MessageHeader, Value)> {
    let header = parse_message_header(buf)?;
    let frame_len = header.frame_len()?;
    if buf.len() < frame_len {
        return Err(CodecError::TruncatedInput {
            offset: HEADER_LEN,
            need: header.payload_len()?,
            have: buf.len() - HEADER_LEN,
        });
    }

    let reader = ChunkReader::at(&buf[..frame_len], HEADER_LEN, header.byte_order);
    let mut decoder = Decoder::new(reader, config);
    let value = decoder.value(false, 0)?;

    decoder.counters.add_decoded_message(frame_len);
    counters.merge(&decoder.counters);
    debug!(%header, kind = value.type_name(), "decoded message");
    Ok((header, value))
}

/// Decode one chunk at the reader's position.
///
/// Set `inside_list` when the chunk is a list element so trailing alignment
/// is consumed.
pub fn decode_value(reader: &mut ChunkReader<'_>, inside_list: bool) -> Result<Value> {
    let mut counters = CodecCounters::default();
    decode_value_with(reader, inside_list, &CodecConfig::default(), &mut counters)
}

/// Like [`decode_value`], with the depth limit from `config`. On error the
/// reader and `counters` are left untouched.
pub fn decode_value_with(
    reader: &mut ChunkReader<'_>,
    inside_list: bool,
    config: &CodecConfig,
    counters: &mut CodecCounters,
) -> Result<Value> {
    let mut decoder = Decoder::new(reader.clone(), config);
    let value = decoder.value(inside_list, 0)?;
    *reader = decoder.reader;
    counters.merge(&decoder.counters);
    Ok(value)
}

/// Recursive decoder. Counts go into its own `counters` and are merged into
/// the caller's only once the whole chunk has decoded.
struct Decoder<'a> {
    reader: ChunkReader<'a>,
    counters: CodecCounters,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(reader: ChunkReader<'a>, config: &CodecConfig) -> Self {
        Self { reader, counters: CodecCounters::default(), max_depth: config.max_depth }
    }

    fn value(&mut self, inside_list: bool, depth: usize) -> Result<Value> {
        let start = self.reader.position();
        let header = read_chunk_header(&mut self.reader)?;
        let tag = TypeTag::verify(header.type_tag)?;
        trace!(?tag, offset = start, count = ?header.count, "decode chunk");

        let value = match tag {
            TypeTag::Int => Value::Int32(self.reader.read_i32()?),
            TypeTag::Float => {
                self.reader.skip(4)?;
                Value::Float64(self.reader.read_f64()?)
            }
            TypeTag::Char => Value::Char(self.reader.read_u8()?),
            TypeTag::CharString => {
                let bytes = self.reader.read_bytes(header.len())?.to_vec();
                self.reader.skip(1)?;
                Value::CharString(bytes)
            }
            TypeTag::Symbol => Value::Symbol(self.symbol()?),
            TypeTag::SymbolVector => {
                let mut syms = Vec::with_capacity(header.len().min(self.reader.remaining()));
                for _ in 0..header.len() {
                    syms.push(self.symbol()?);
                }
                Value::SymbolVector(syms)
            }
            TypeTag::Null => Value::Null,
            TypeTag::List => {
                self.enter(depth)?;
                let mut items = Vec::with_capacity(header.len().min(self.reader.remaining()));
                for _ in 0..header.len() {
                    items.push(self.value(true, depth + 1)?);
                }
                Value::List(items)
            }
            TypeTag::Dict => {
                self.enter(depth)?;
                let mut map = Dict::new();
                for index in 0..header.len() {
                    let (key, value) = self.dict_entry(index, depth + 1)?;
                    map.insert(key, value);
                }
                Value::Dict(map)
            }
            TypeTag::Function => return Err(CodecError::UnsupportedType(header.type_tag)),
        };
        self.counters.add_decoded_chunk(tag);

        if inside_list {
            let skipped = self.reader.align_from(start)?;
            if skipped > 0 {
                trace!(skipped, "skip element padding");
            }
            self.counters.add_padding(skipped);
        }
        Ok(value)
    }

    /// One dict entry: a list chunk `[symbol key; value; attributes]`.
    fn dict_entry(&mut self, index: usize, depth: usize) -> Result<(String, Value)> {
        let entry = self.value(false, depth)?;
        let malformed = |reason: String| CodecError::InvalidDictEntry { index, reason };

        let items = match entry {
            Value::List(items) => items,
            other => return Err(malformed(format!("expected list, got {}", other.type_name()))),
        };
        let Ok([key, value, _attrs]) = <[Value; 3]>::try_from(items) else {
            return Err(malformed("expected 3 elements".to_string()));
        };
        match key {
            Value::Symbol(key) => Ok((key, value)),
            other => Err(malformed(format!("key is {}, not symbol", other.type_name()))),
        }
    }

    fn symbol(&mut self) -> Result<String> {
        let offset = self.reader.position();
        let bytes = self.reader.read_cstr()?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidSymbol { offset })
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(CodecError::DepthExceeded { max: self.max_depth });
        }
        Ok(())
    }
}
