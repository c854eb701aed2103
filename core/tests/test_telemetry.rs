#[cfg(test)]
mod telemetry_tests {
    use k3ipc_core::{
        codec::{
            decode_message_with, decode_value_with, encode_message_with, encode_value_with,
            ChunkReader,
        },
        config::CodecConfig,
        headers::Endianness,
        telemetry::{ChunkCounts, CodecCounters, CodecSnapshot},
        utils::num_str_to_bytes,
        CodecError, Value,
    };

    fn mixed_list() -> Value {
        Value::List(vec![Value::from("abc"), Value::Int32(1)])
    }

    fn roundtrip_counters() -> CodecCounters {
        let config = CodecConfig::default();
        let mut counters = CodecCounters::new();
        let wire = encode_message_with(&mixed_list(), &config, &mut counters).unwrap();
        decode_message_with(&wire, &config, &mut counters).unwrap();
        counters
    }

    #[test]
    fn encoder_counts_chunks_and_padding() {
        let mut counters = CodecCounters::new();
        encode_message_with(&mixed_list(), &CodecConfig::default(), &mut counters).unwrap();

        assert_eq!(counters.messages_encoded, 1);
        assert_eq!(counters.bytes_encoded, 40);
        assert_eq!(counters.bytes_padding, 4);
        assert_eq!(counters.chunks_encoded.lists, 1);
        assert_eq!(counters.chunks_encoded.strings, 1);
        assert_eq!(counters.chunks_encoded.ints, 1);
        assert_eq!(counters.chunks_encoded.total(), 3);
        assert_eq!(counters.messages_decoded, 0);
    }

    #[test]
    fn decoder_counts_skipped_padding() {
        let counters = roundtrip_counters();
        assert_eq!(counters.messages_decoded, 1);
        assert_eq!(counters.bytes_decoded, 40);
        assert_eq!(counters.bytes_padding, 8);
        assert_eq!(counters.chunks_decoded, counters.chunks_encoded);
    }

    #[test]
    fn dict_entries_count_as_lists() {
        let mut counters = CodecCounters::new();
        let wire = encode_message_with(
            &Value::dict([("a", Value::Int32(1))]),
            &CodecConfig::default(),
            &mut counters,
        )
        .unwrap();
        decode_message_with(&wire, &CodecConfig::default(), &mut counters).unwrap();

        let expected = ChunkCounts { lists: 1, ints: 1, symbols: 1, dicts: 1, nulls: 1, ..Default::default() };
        assert_eq!(counters.chunks_encoded, expected);
        assert_eq!(counters.chunks_decoded, expected);
    }

    #[test]
    fn merge_adds_every_field() {
        let mut a = roundtrip_counters();
        let b = roundtrip_counters();
        a.merge(&b);
        assert_eq!(a.messages_encoded, 2);
        assert_eq!(a.bytes_decoded, 80);
        assert_eq!(a.bytes_padding, 16);
        assert_eq!(a.chunks_decoded.strings, 2);

        let mut c = CodecCounters::new();
        c += b.clone();
        assert_eq!(c, b);

        c.reset();
        assert_eq!(c, CodecCounters::default());
    }

    #[test]
    fn snapshot_reports_padding_ratio() {
        let snapshot = CodecSnapshot::from(&roundtrip_counters());
        assert_eq!(snapshot.chunks_encoded, 3);
        assert!((snapshot.padding_ratio - 0.1).abs() < 1e-12);
        assert!(snapshot.sanity_check());

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"padding_ratio\""));
        assert!(json.contains("\"bytes_padding\":8"));
    }

    #[test]
    fn empty_snapshot_has_zero_ratio() {
        let snapshot = CodecSnapshot::from(&CodecCounters::default());
        assert_eq!(snapshot.padding_ratio, 0.0);
        assert!(snapshot.sanity_check());
    }

    #[test]
    fn counters_roundtrip_through_bincode() {
        let counters = roundtrip_counters();
        let config = bincode::config::standard();
        let bytes = bincode::encode_to_vec(&counters, config).unwrap();
        let (back, read): (CodecCounters, usize) = bincode::decode_from_slice(&bytes, config).unwrap();
        assert_eq!(back, counters);
        assert_eq!(read, bytes.len());
    }

    #[test]
    fn failed_decode_leaves_counters_untouched() {
        // (1; <tag 99>): the int decodes before the bad tag is reached
        let wire = num_str_to_bytes(
            "1 0 0 0 24 0 0 0 0 0 0 0 2 0 0 0 1 0 0 0 1 0 0 0 99 0 0 0 0 0 0 0",
        )
        .unwrap();
        let mut counters = CodecCounters::new();
        let err = decode_message_with(&wire, &CodecConfig::default(), &mut counters).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedType(99)));
        assert_eq!(counters, CodecCounters::default());

        let before = roundtrip_counters();
        let mut counters = before.clone();
        assert!(decode_message_with(&wire, &CodecConfig::default(), &mut counters).is_err());
        assert_eq!(counters, before);
    }

    #[test]
    fn failed_encode_leaves_counters_untouched() {
        // string and int encode, then the NUL in the symbol is rejected
        let v = Value::List(vec![Value::from("abc"), Value::Int32(1), Value::sym("a\0b")]);
        let mut counters = CodecCounters::new();
        let err = encode_message_with(&v, &CodecConfig::default(), &mut counters).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedValue(_)));
        assert_eq!(counters, CodecCounters::default());

        let deep = Value::List(vec![Value::List(vec![Value::List(vec![])])]);
        let config = CodecConfig::default().with_max_depth(2);
        assert!(encode_message_with(&deep, &config, &mut counters).is_err());
        assert_eq!(counters, CodecCounters::default());
    }

    #[test]
    fn failed_reader_frame_does_not_leak_counts() {
        let mut stream = k3ipc_core::codec::bd(&Value::Int32(1)).unwrap();
        stream.extend(
            num_str_to_bytes("1 0 0 0 24 0 0 0 0 0 0 0 2 0 0 0 1 0 0 0 1 0 0 0 99 0 0 0 0 0 0 0")
                .unwrap(),
        );
        let mut reader = k3ipc_core::io::MessageReader::new(std::io::Cursor::new(stream));
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().unwrap().is_err());

        let counters = reader.counters();
        assert_eq!(counters.messages_decoded, 1);
        assert_eq!(counters.bytes_decoded, 16);
        assert_eq!(counters.chunks_decoded.total(), 1);
        assert_eq!(counters.bytes_padding, 0);
    }

    #[test]
    fn value_entry_points_honour_config_and_counters() {
        let list = mixed_list();
        let mut buf = Vec::new();
        let mut counters = CodecCounters::new();
        let config = CodecConfig::default().with_byte_order(Endianness::Big);
        let written = encode_value_with(&mut buf, &list, &config, &mut counters).unwrap();
        assert_eq!(written, 32);
        assert_eq!(&buf[..4], &[0, 0, 0, 0]);
        assert_eq!(&buf[4..8], &[0, 0, 0, 2]);
        assert_eq!(counters.chunks_encoded.total(), 3);
        assert_eq!(counters.bytes_padding, 4);
        assert_eq!(counters.messages_encoded, 0);

        let mut reader = ChunkReader::new(&buf, Endianness::Big);
        let back = decode_value_with(&mut reader, false, &config, &mut counters).unwrap();
        assert_eq!(back, list);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(counters.chunks_decoded.total(), 3);
        assert_eq!(counters.bytes_padding, 8);

        let shallow = CodecConfig::default().with_max_depth(0);
        let mut reader = ChunkReader::new(&buf, Endianness::Big);
        let err = decode_value_with(&mut reader, false, &shallow, &mut counters).unwrap_err();
        assert!(matches!(err, CodecError::DepthExceeded { max: 0 }));
        assert_eq!(reader.position(), 0);

        let before = buf.len();
        assert!(encode_value_with(&mut buf, &list, &shallow, &mut counters).is_err());
        assert_eq!(buf.len(), before);
        assert_eq!(counters.chunks_decoded.total(), 3);
        assert_eq!(counters.chunks_encoded.total(), 3);
    }
}
