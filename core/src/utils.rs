use std::num::ParseIntError;

use crate::constants::ALIGNMENT;

/// Zero bytes needed after `len` bytes to land on the alignment boundary.
#[inline]
pub const fn padding_for(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}

/// `len` rounded up to the alignment boundary.
#[inline]
pub const fn aligned_len(len: usize) -> usize {
    len + padding_for(len)
}

/// Parse the space-separated decimal byte notation used in test vectors,
/// e.g. `"1 0 0 0 8 0 0 0"`. Runs of whitespace are tolerated.
pub fn num_str_to_bytes(s: &str) -> Result<Vec<u8>, ParseIntError> {
    s.split_whitespace().map(str::parse::<u8>).collect()
}

/// Inverse of [`num_str_to_bytes`].
pub fn bytes_to_num_str(bytes: &[u8]) -> String {
    bytes.iter().map(u8::to_string).collect::<Vec<_>>().join(" ")
}

/// Printable rendering for logs: text when it is plain ASCII, hex otherwise.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}
