//! io.rs
//! Message framing over `std::io`.
//!
//! The transport contract in one place: read the 8-byte envelope, read
//! exactly `payload_length` more bytes, hand the whole frame to the decoder.
//! No sockets here; any `Read`/`Write` works (a `TcpStream`, a pipe, a
//! `Cursor<Vec<u8>>` in tests).

use std::io::{self, Read, Write};
use tracing::{debug, trace};

use crate::codec::{decode_message_with, encode_message_with};
use crate::config::CodecConfig;
use crate::constants::HEADER_LEN;
use crate::headers::{parse_message_header, set_message_type, MessageHeader, MessageType};
use crate::telemetry::CodecCounters;
use crate::types::{CodecError, Result};
use crate::utils::fmt_bytes;
use crate::value::Value;

/// Read one complete framed message (envelope + payload).
///
/// EOF anywhere inside the frame is `TruncatedInput`.
pub fn read_message<R: Read>(reader: &mut R, config: &CodecConfig) -> Result<Vec<u8>> {
    match read_frame(reader, config)? {
        Some(frame) => Ok(frame),
        None => Err(CodecError::TruncatedInput { offset: 0, need: HEADER_LEN, have: 0 }),
    }
}

/// Write an already-encoded message verbatim and flush.
pub fn write_message<W: Write>(writer: &mut W, frame: &[u8]) -> Result<()> {
    writer.write_all(frame)?;
    writer.flush()?;
    trace!(bytes = frame.len(), "wrote message");
    Ok(())
}

/// Encode `value`, tag it with `message_type` and write it.
pub fn send_value<W: Write>(
    writer: &mut W,
    value: &Value,
    message_type: MessageType,
    config: &CodecConfig,
    counters: &mut CodecCounters,
) -> Result<()> {
    let mut frame = encode_message_with(value, config, counters)?;
    set_message_type(&mut frame, message_type)?;
    write_message(writer, &frame)
}

/// `Ok(None)` on a clean EOF before the first envelope byte.
fn read_frame<R: Read>(reader: &mut R, config: &CodecConfig) -> Result<Option<Vec<u8>>> {
    let mut envelope = [0u8; HEADER_LEN];
    let filled = read_full(reader, &mut envelope)?;
    if filled == 0 {
        return Ok(None);
    }
    if filled < HEADER_LEN {
        return Err(CodecError::TruncatedInput { offset: 0, need: HEADER_LEN, have: filled });
    }

    let header = parse_message_header(&envelope)?;
    let payload_len = header.payload_len()?;
    if payload_len > config.max_payload_len {
        return Err(CodecError::PayloadTooLarge { len: payload_len, max: config.max_payload_len });
    }

    let mut frame = Vec::with_capacity(HEADER_LEN + payload_len);
    frame.extend_from_slice(&envelope);
    frame.resize(HEADER_LEN + payload_len, 0);
    let got = read_full(reader, &mut frame[HEADER_LEN..])?;
    if got < payload_len {
        return Err(CodecError::TruncatedInput { offset: HEADER_LEN + got, need: payload_len, have: got });
    }

    trace!(envelope = %fmt_bytes(&envelope), "read message envelope");
    Ok(Some(frame))
}

/// Like `read_exact`, but reports how much was read before EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Iterator over the messages of a byte stream.
///
/// Ends cleanly when the stream ends on a frame boundary. After the first
/// error it yields nothing more: the format has no resync markers.
pub struct MessageReader<R> {
    inner: R,
    config: CodecConfig,
    counters: CodecCounters,
    failed: bool,
}

impl<R: Read> MessageReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    pub fn with_config(inner: R, config: CodecConfig) -> Self {
        Self { inner, config, counters: CodecCounters::default(), failed: false }
    }

    pub fn counters(&self) -> &CodecCounters {
        &self.counters
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn next_message(&mut self) -> Result<Option<(MessageHeader, Value)>> {
        let Some(frame) = read_frame(&mut self.inner, &self.config)? else {
            return Ok(None);
        };
        decode_message_with(&frame, &self.config, &mut self.counters).map(Some)
    }
}

impl<R: Read> Iterator for MessageReader<R> {
    type Item = Result<(MessageHeader, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_message() {
            Ok(Some(msg)) => Some(Ok(msg)),
            Ok(None) => {
                debug!(messages = self.counters.messages_decoded, "message stream ended");
                None
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
