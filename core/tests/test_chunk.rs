// Chunk header parser, reader/writer cursors and alignment helpers.

use k3ipc_core::{
    codec::{read_chunk_header, write_chunk_header, ChunkHeader, ChunkReader, ChunkWriter, TypeTag},
    constants::tags,
    headers::Endianness,
    utils::{aligned_len, bytes_to_num_str, fmt_bytes, num_str_to_bytes, padding_for},
    CodecError,
};

fn bytes(s: &str) -> Vec<u8> {
    num_str_to_bytes(s).unwrap()
}

// # ✅ 1. Count presence follows the tag sign

#[test]
fn scalar_tags_have_no_count() {
    for tag in [tags::INT, tags::FLOAT, tags::CHAR, tags::SYMBOL, tags::NULL] {
        assert!(!ChunkHeader::has_count(tag), "tag {tag}");
    }
}

#[test]
fn list_vectors_and_dict_have_count() {
    for tag in [tags::LIST, tags::STRING, tags::SYMBOL_VECTOR, tags::DICT, -1, -2] {
        assert!(ChunkHeader::has_count(tag), "tag {tag}");
    }
}

#[test]
fn read_scalar_header() {
    let buf = bytes("1 0 0 0 210 4 0 0");
    let mut r = ChunkReader::new(&buf, Endianness::Little);
    let h = read_chunk_header(&mut r).unwrap();
    assert_eq!(h, ChunkHeader::scalar(tags::INT));
    assert_eq!(r.position(), 4);
}

#[test]
fn read_counted_header() {
    let buf = bytes("253 255 255 255 2 0 0 0 104 105 0");
    let mut r = ChunkReader::new(&buf, Endianness::Little);
    let h = read_chunk_header(&mut r).unwrap();
    assert_eq!(h, ChunkHeader::counted(tags::STRING, 2));
    assert_eq!(h.len(), 2);
    assert_eq!(r.position(), 8);
}

#[test]
fn read_dict_header_has_count() {
    let buf = bytes("0 0 0 5 0 0 0 3");
    let mut r = ChunkReader::new(&buf, Endianness::Big);
    assert_eq!(read_chunk_header(&mut r).unwrap(), ChunkHeader::counted(tags::DICT, 3));
}

#[test]
fn negative_count_is_rejected() {
    let buf = bytes("0 0 0 0 255 255 255 255");
    let mut r = ChunkReader::new(&buf, Endianness::Little);
    assert!(matches!(
        read_chunk_header(&mut r),
        Err(CodecError::InvalidCount { tag: 0, count: -1 })
    ));
}

#[test]
fn missing_count_is_truncated() {
    let buf = bytes("0 0 0 0 2 0");
    let mut r = ChunkReader::new(&buf, Endianness::Little);
    assert!(matches!(read_chunk_header(&mut r), Err(CodecError::TruncatedInput { offset: 4, .. })));
}

#[test]
fn hand_built_negative_count_has_zero_len() {
    let h = ChunkHeader::counted(tags::LIST, -5);
    assert_eq!(h.len(), 0);
    assert!(h.is_empty());
    assert_eq!(ChunkHeader::counted(tags::LIST, 3).len(), 3);
    assert_eq!(ChunkHeader::scalar(tags::INT).len(), 0);
}

#[test]
fn write_header_reports_length() {
    let mut out = Vec::new();
    let mut w = ChunkWriter::new(&mut out, Endianness::Little);
    assert_eq!(write_chunk_header(&mut w, &ChunkHeader::scalar(tags::SYMBOL)), 4);
    assert_eq!(write_chunk_header(&mut w, &ChunkHeader::counted(tags::SYMBOL_VECTOR, 2)), 8);
    assert_eq!(out, bytes("4 0 0 0 252 255 255 255 2 0 0 0"));
}

// # ✅ 2. Type tag table

#[test]
fn type_tag_table() {
    assert_eq!(TypeTag::verify(0).unwrap(), TypeTag::List);
    assert_eq!(TypeTag::verify(-3).unwrap(), TypeTag::CharString);
    assert_eq!(TypeTag::verify(-4).unwrap(), TypeTag::SymbolVector);
    assert_eq!(TypeTag::verify(7).unwrap(), TypeTag::Function);
    assert!(TypeTag::CharString.is_vector());
    assert!(!TypeTag::Dict.is_vector());
}

#[test]
fn unknown_tags_are_unsupported() {
    for raw in [99, 8, -1, -2, -5] {
        assert!(matches!(TypeTag::verify(raw), Err(CodecError::UnsupportedType(t)) if t == raw));
    }
}

// # ✅ 3. Cursor behaviour

#[test]
fn read_cstr_consumes_terminator() {
    let buf = bytes("97 98 0 99 0");
    let mut r = ChunkReader::new(&buf, Endianness::Little);
    assert_eq!(r.read_cstr().unwrap(), b"ab");
    assert_eq!(r.read_cstr().unwrap(), b"c");
    assert_eq!(r.remaining(), 0);
}

#[test]
fn read_cstr_without_terminator_is_truncated() {
    let buf = bytes("97 98");
    let mut r = ChunkReader::new(&buf, Endianness::Little);
    assert!(matches!(r.read_cstr(), Err(CodecError::TruncatedInput { .. })));
}

#[test]
fn align_from_skips_to_boundary() {
    let buf = vec![0u8; 16];
    let mut r = ChunkReader::at(&buf, 3, Endianness::Little);
    r.skip(2).unwrap();
    assert_eq!(r.align_from(3).unwrap(), 6);
    assert_eq!(r.position(), 11);
}

#[test]
fn big_endian_scalars() {
    let buf = bytes("0 0 4 210 63 241 153 153 153 153 153 154");
    let mut r = ChunkReader::new(&buf, Endianness::Big);
    assert_eq!(r.read_i32().unwrap(), 1234);
    assert_eq!(r.read_f64().unwrap(), 1.1);
}

#[test]
fn writer_pads_relative_to_start() {
    let mut out = vec![0xAA; 3];
    let mut w = ChunkWriter::new(&mut out, Endianness::Little);
    w.put_bytes(b"abcde");
    assert_eq!(w.pad_from(3), 3);
    assert_eq!(w.len(), 11);
}

// # ✅ 4. Helpers

#[test]
fn padding_math() {
    assert_eq!(padding_for(0), 0);
    assert_eq!(padding_for(1), 7);
    assert_eq!(padding_for(5), 3);
    assert_eq!(padding_for(8), 0);
    assert_eq!(padding_for(12), 4);
    assert_eq!(aligned_len(13), 16);
    assert_eq!(aligned_len(16), 16);
}

#[test]
fn num_str_helpers_are_inverse() {
    let s = "1 0 0 0 8 0 0 0 1 0 0 0 210 4 0 0";
    assert_eq!(bytes_to_num_str(&num_str_to_bytes(s).unwrap()), s);
    assert!(num_str_to_bytes("1 300").is_err());
    assert_eq!(num_str_to_bytes("  1   2 ").unwrap(), vec![1, 2]);
}

#[test]
fn fmt_bytes_text_or_hex() {
    assert_eq!(fmt_bytes(b"abc"), "b\"abc\"");
    assert_eq!(fmt_bytes(&[1, 0, 0, 2]), "0x01000002");
}
