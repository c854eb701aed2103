//! codec/cursor.rs
//! Bounds-checked reader and append-only writer over one message buffer.
//!
//! Both carry the message byte order explicitly; nothing here is global.

use crate::headers::Endianness;
use crate::types::{CodecError, Result};
use crate::utils::padding_for;

/// Read cursor: an immutable buffer plus an owned position.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    buf: &'a [u8],
    pos: usize,
    order: Endianness,
}

impl<'a> ChunkReader<'a> {
    pub fn new(buf: &'a [u8], order: Endianness) -> Self {
        Self { buf, pos: 0, order }
    }

    /// Start reading at `pos` (e.g. just past the envelope).
    pub fn at(buf: &'a [u8], pos: usize, order: Endianness) -> Self {
        Self { buf, pos, order }
    }

    #[inline]
    pub fn order(&self) -> Endianness {
        self.order
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::TruncatedInput {
                offset: self.pos,
                need: n,
                have: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let order = self.order;
        Ok(order.read_i32(self.read_bytes(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let order = self.order;
        Ok(order.read_f64(self.read_bytes(8)?))
    }

    /// Bytes up to the next NUL; the NUL is consumed but not returned.
    pub fn read_cstr(&mut self) -> Result<&'a [u8]> {
        let rest = &self.buf[self.pos.min(self.buf.len())..];
        match rest.iter().position(|&b| b == 0) {
            Some(n) => {
                let out = &rest[..n];
                self.pos += n + 1;
                Ok(out)
            }
            None => Err(CodecError::TruncatedInput {
                offset: self.pos,
                need: rest.len() + 1,
                have: rest.len(),
            }),
        }
    }

    /// Skip padding so that the bytes consumed since `start` reach a multiple
    /// of the alignment. Returns the number of bytes skipped.
    pub fn align_from(&mut self, start: usize) -> Result<usize> {
        let pad = padding_for(self.pos - start);
        self.skip(pad)?;
        Ok(pad)
    }
}

/// Append-only writer into a caller-owned buffer.
#[derive(Debug)]
pub struct ChunkWriter<'a> {
    out: &'a mut Vec<u8>,
    order: Endianness,
}

impl<'a> ChunkWriter<'a> {
    pub fn new(out: &'a mut Vec<u8>, order: Endianness) -> Self {
        Self { out, order }
    }

    #[inline]
    pub fn order(&self) -> Endianness {
        self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn put_u8(&mut self, v: u8) {
        self.out.push(v);
    }

    pub fn put_i32(&mut self, v: i32) {
        let bytes = self.order.i32_bytes(v);
        self.out.extend_from_slice(&bytes);
    }

    pub fn put_f64(&mut self, v: f64) {
        let bytes = self.order.f64_bytes(v);
        self.out.extend_from_slice(&bytes);
    }

    pub fn put_bytes(&mut self, b: &[u8]) {
        self.out.extend_from_slice(b);
    }

    pub fn put_zeros(&mut self, n: usize) {
        self.out.resize(self.out.len() + n, 0);
    }

    /// Zero-fill until the bytes written since `start` reach a multiple of the
    /// alignment. Returns the number of bytes added.
    pub fn pad_from(&mut self, start: usize) -> usize {
        let pad = padding_for(self.out.len() - start);
        self.put_zeros(pad);
        pad
    }
}
