//! codec/encode.rs
//!
//! Value encoder and message builder (`Bd`).
//!
//! Design notes:
//! - Every chunk writer returns the bytes it emitted (tag + count + payload)
//!   so list and dict writers can account for the padding they add.
//! - List elements are followed by zero bytes until the list body, measured
//!   from the list's own tag, is a multiple of 8.
//! - Dicts are only valid as the root value; a dict nested in a list or as a
//!   dict value is rejected.

use tracing::{debug, trace};

use crate::codec::chunk::{write_chunk_header, ChunkHeader, TypeTag};
use crate::codec::cursor::ChunkWriter;
use crate::config::CodecConfig;
use crate::constants::{tags, FLOAT_PAD, HEADER_LEN};
use crate::headers::{begin_message, patch_payload_length, set_message_type, Endianness, MessageType};
use crate::telemetry::CodecCounters;
use crate::types::{CodecError, Result};
use crate::value::{Dict, Value};

/// Encode `value` as a little-endian SET message.
pub fn bd(value: &Value) -> Result<Vec<u8>> {
    encode_message(value, &CodecConfig::default())
}

/// Encode `value` and tag the message with `message_type`.
pub fn k3_msg(value: &Value, message_type: MessageType) -> Result<Vec<u8>> {
    let mut buf = bd(value)?;
    set_message_type(&mut buf, message_type)?;
    Ok(buf)
}

pub fn encode_message(value: &Value, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut counters = CodecCounters::default();
    encode_message_with(value, config, &mut counters)
}

/// Build a complete framed message: envelope, payload, patched length.
///
/// `counters` is only updated when the whole value encodes.
pub fn encode_message_with(
    value: &Value,
    config: &CodecConfig,
    counters: &mut CodecCounters,
) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 16);
    begin_message(&mut buf, config.byte_order);

    let (written, mut local) = {
        let mut encoder = Encoder::new(&mut buf, config);
        let written = encoder.value(value, 0)?;
        (written, encoder.counters)
    };
    debug_assert_eq!(written, buf.len() - HEADER_LEN, "payload length drift");
    let payload_len = buf.len() - HEADER_LEN;
    patch_payload_length(&mut buf, payload_len)?;

    local.add_encoded_message(buf.len());
    counters.merge(&local);
    debug!(kind = value.type_name(), bytes = buf.len(), "encoded message");
    Ok(buf)
}

/// Append one chunk for `value` to `buf` and return its length, excluding
/// any padding a caller may add after it.
pub fn encode_value(buf: &mut Vec<u8>, order: Endianness, value: &Value) -> Result<usize> {
    let config = CodecConfig::default().with_byte_order(order);
    let mut counters = CodecCounters::default();
    encode_value_with(buf, value, &config, &mut counters)
}

/// Like [`encode_value`], with byte order and depth limit from `config`.
/// On error `buf` is truncated back to its original length and `counters`
/// is left untouched.
pub fn encode_value_with(
    buf: &mut Vec<u8>,
    value: &Value,
    config: &CodecConfig,
    counters: &mut CodecCounters,
) -> Result<usize> {
    let start = buf.len();
    let mut encoder = Encoder::new(buf, config);
    let result = encoder.value(value, 0);
    let local = encoder.counters;
    match result {
        Ok(written) => {
            counters.merge(&local);
            Ok(written)
        }
        Err(e) => {
            buf.truncate(start);
            Err(e)
        }
    }
}

/// Recursive encoder. Counts go into its own `counters` and are merged into
/// the caller's only once the whole value has encoded.
struct Encoder<'a> {
    writer: ChunkWriter<'a>,
    counters: CodecCounters,
    max_depth: usize,
}

impl<'a> Encoder<'a> {
    fn new(buf: &'a mut Vec<u8>, config: &CodecConfig) -> Self {
        Self {
            writer: ChunkWriter::new(buf, config.byte_order),
            counters: CodecCounters::default(),
            max_depth: config.max_depth,
        }
    }

    fn value(&mut self, value: &Value, depth: usize) -> Result<usize> {
        trace!(kind = value.type_name(), offset = self.writer.len(), "encode chunk");
        let (tag, len) = match value {
            Value::Int32(v) => {
                self.header(ChunkHeader::scalar(tags::INT));
                self.writer.put_i32(*v);
                (TypeTag::Int, 8)
            }
            Value::Float64(v) => {
                self.header(ChunkHeader::scalar(tags::FLOAT));
                self.writer.put_i32(FLOAT_PAD);
                self.writer.put_f64(*v);
                (TypeTag::Float, 16)
            }
            Value::Char(c) => {
                self.header(ChunkHeader::scalar(tags::CHAR));
                self.writer.put_u8(*c);
                self.writer.put_zeros(3);
                (TypeTag::Char, 8)
            }
            Value::CharString(bytes) => {
                self.header(ChunkHeader::counted(tags::STRING, wire_count(bytes.len())?));
                self.writer.put_bytes(bytes);
                self.writer.put_u8(0);
                (TypeTag::CharString, 8 + bytes.len() + 1)
            }
            Value::Symbol(s) => {
                self.header(ChunkHeader::scalar(tags::SYMBOL));
                let n = self.symbol(s)?;
                (TypeTag::Symbol, 4 + n)
            }
            Value::SymbolVector(syms) => {
                self.header(ChunkHeader::counted(tags::SYMBOL_VECTOR, wire_count(syms.len())?));
                let mut len = 8;
                for s in syms {
                    len += self.symbol(s)?;
                }
                (TypeTag::SymbolVector, len)
            }
            Value::Null => {
                self.header(ChunkHeader::scalar(tags::NULL));
                self.writer.put_zeros(4);
                (TypeTag::Null, 8)
            }
            Value::List(items) => {
                self.enter(depth)?;
                (TypeTag::List, self.list(items.iter(), depth)?)
            }
            Value::Dict(map) => {
                if depth > 0 {
                    return Err(CodecError::UnsupportedValue(
                        "dict nested inside another value".to_string(),
                    ));
                }
                self.enter(depth)?;
                (TypeTag::Dict, self.dict(map, depth)?)
            }
        };
        self.counters.add_encoded_chunk(tag);
        Ok(len)
    }

    /// `[LIST][count]` then each element padded to the 8-byte boundary.
    fn list<'v, I>(&mut self, items: I, depth: usize) -> Result<usize>
    where
        I: ExactSizeIterator<Item = &'v Value>,
    {
        let start = self.writer.len();
        let mut len = self.header(ChunkHeader::counted(tags::LIST, wire_count(items.len())?));
        for item in items {
            len += self.value(item, depth + 1)?;
            let pad = self.writer.pad_from(start);
            self.counters.add_padding(pad);
            len += pad;
        }
        Ok(len)
    }

    /// `[DICT][count]` then one `[symbol; value; null]` list per entry.
    fn dict(&mut self, map: &Dict, depth: usize) -> Result<usize> {
        let mut len = self.header(ChunkHeader::counted(tags::DICT, wire_count(map.len())?));
        for (key, value) in map {
            self.enter(depth + 1)?;
            let key = Value::Symbol(key.clone());
            let attrs = Value::Null;
            let entry = [&key, value, &attrs];
            len += self.list(entry.into_iter(), depth + 1)?;
            self.counters.add_encoded_chunk(TypeTag::List);
        }
        Ok(len)
    }

    /// Symbol text plus NUL terminator; returns bytes written.
    fn symbol(&mut self, s: &str) -> Result<usize> {
        if s.as_bytes().contains(&0) {
            return Err(CodecError::UnsupportedValue(format!(
                "symbol {:?} contains a NUL byte",
                s
            )));
        }
        self.writer.put_bytes(s.as_bytes());
        self.writer.put_u8(0);
        Ok(s.len() + 1)
    }

    fn header(&mut self, h: ChunkHeader) -> usize {
        write_chunk_header(&mut self.writer, &h)
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(CodecError::DepthExceeded { max: self.max_depth });
        }
        Ok(())
    }
}

fn wire_count(n: usize) -> Result<i32> {
    i32::try_from(n).map_err(|_| CodecError::PayloadTooLarge { len: n, max: i32::MAX as usize })
}
