//! telemetry/counters.rs
//! Mutable counters filled in by the decoder, encoder and frame reader.
use bincode::{Decode, Encode};
use std::ops::AddAssign;

use crate::codec::TypeTag;

/// Per-kind chunk tallies.
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq)]
pub struct ChunkCounts {
    pub lists: u64,
    pub ints: u64,
    pub floats: u64,
    pub chars: u64,
    pub strings: u64,
    pub symbols: u64,
    pub symbol_vectors: u64,
    pub dicts: u64,
    pub nulls: u64,
}

impl ChunkCounts {
    pub fn record(&mut self, tag: TypeTag) {
        match tag {
            TypeTag::List => self.lists += 1,
            TypeTag::Int => self.ints += 1,
            TypeTag::Float => self.floats += 1,
            TypeTag::Char => self.chars += 1,
            TypeTag::CharString => self.strings += 1,
            TypeTag::Symbol => self.symbols += 1,
            TypeTag::SymbolVector => self.symbol_vectors += 1,
            TypeTag::Dict => self.dicts += 1,
            TypeTag::Null => self.nulls += 1,
            // never emitted or accepted
            TypeTag::Function => {}
        }
    }

    pub fn total(&self) -> u64 {
        self.lists
            + self.ints
            + self.floats
            + self.chars
            + self.strings
            + self.symbols
            + self.symbol_vectors
            + self.dicts
            + self.nulls
    }
}

impl AddAssign<&ChunkCounts> for ChunkCounts {
    fn add_assign(&mut self, rhs: &ChunkCounts) {
        self.lists          += rhs.lists;
        self.ints           += rhs.ints;
        self.floats         += rhs.floats;
        self.chars          += rhs.chars;
        self.strings        += rhs.strings;
        self.symbols        += rhs.symbols;
        self.symbol_vectors += rhs.symbol_vectors;
        self.dicts          += rhs.dicts;
        self.nulls          += rhs.nulls;
    }
}

/// Deterministic counters collected while decoding and encoding messages.
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq)]
pub struct CodecCounters {
    pub messages_decoded: u64,
    pub messages_encoded: u64,
    /// Whole frames, envelope included.
    pub bytes_decoded: u64,
    pub bytes_encoded: u64,
    /// Alignment bytes skipped on decode or written on encode.
    pub bytes_padding: u64,
    pub chunks_decoded: ChunkCounts,
    pub chunks_encoded: ChunkCounts,
}

impl CodecCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_decoded_message(&mut self, frame_len: usize) {
        self.messages_decoded += 1;
        self.bytes_decoded += frame_len as u64;
    }

    pub fn add_encoded_message(&mut self, frame_len: usize) {
        self.messages_encoded += 1;
        self.bytes_encoded += frame_len as u64;
    }

    pub fn add_decoded_chunk(&mut self, tag: TypeTag) {
        self.chunks_decoded.record(tag);
    }

    pub fn add_encoded_chunk(&mut self, tag: TypeTag) {
        self.chunks_encoded.record(tag);
    }

    pub fn add_padding(&mut self, n: usize) {
        self.bytes_padding += n as u64;
    }

    pub fn merge(&mut self, other: &CodecCounters) {
        self.messages_decoded += other.messages_decoded;
        self.messages_encoded += other.messages_encoded;
        self.bytes_decoded += other.bytes_decoded;
        self.bytes_encoded += other.bytes_encoded;
        self.bytes_padding += other.bytes_padding;
        self.chunks_decoded += &other.chunks_decoded;
        self.chunks_encoded += &other.chunks_encoded;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
