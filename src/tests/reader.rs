use super::*;

const RETURN: &[u8; 32] = b"EXPECTED RETURN!RETURN OF $2.00!";

#[test]
fn uint8() {
    let mut r = BufferReader::new(&[0x10, 0x20, 0x30]);
    assert_eq!(r.uint8(None), Ok(0x10));
    assert_eq!(r.offset(), 1);
    assert_eq!(r.uint8(None), Ok(0x20));
    assert_eq!(r.offset(), 2);
}

#[test]
fn int8() {
    let mut r = BufferReader::new(&[0x7f, 0x80, 0xff]);
    assert_eq!(r.int8(None), Ok(127));
    assert_eq!(r.int8(None), Ok(-128));
    assert_eq!(r.int8(None), Ok(-1));
}

#[test]
fn uint8_at_offset() {
    let mut r = BufferReader::new(&[0x01, 0x02, 0x03, 0x04, 0x05]);
    assert_eq!(r.uint8(Some(3)), Ok(4));
    assert_eq!(r.offset(), 0);
}

#[test]
fn uint16_at_offset() {
    let mut r = BufferReader::new(&[0x01, 0x02, 0x03, 0x00, 0x05]);
    assert_eq!(r.uint16(Some(2)), Ok(3));
    assert_eq!(r.offset(), 0);
}

#[test]
fn buffer_not_modified() {
    let data = [0x10, 0x20, 0x30];
    let mut r = BufferReader::new(&data);
    r.uint8(None).unwrap();
    r.uint8(None).unwrap();
    assert_eq!(r.buffer(), data);
    assert_eq!(r.offset(), 2);
}

#[test]
fn endian() {
    let data = [0xff, 0xfe, 0x01, 0x02, 0x03, 0x04];

    let mut r = BufferReader::new(&data);
    assert_eq!(r.int16(None), Ok(-257));
    assert_eq!(r.uint32(None), Ok(0x0403_0201));

    let mut r = BufferReader::with_config(&data, be());
    assert_eq!(r.int16(None), Ok(-2));
    assert_eq!(r.uint32(None), Ok(0x0102_0304));

    // suffixed accessors ignore the reader's byte order
    let mut r = BufferReader::with_config(&data, be());
    assert_eq!(r.uint16_le(None), Ok(0xfeff));
    assert_eq!(r.int32_le(None), Ok(0x0403_0201));
    let mut r = BufferReader::new(&data);
    assert_eq!(r.uint16_be(None), Ok(0xfffe));
    assert_eq!(r.int32_be(None), Ok(0x0102_0304));
}

#[test]
fn big_uint64_max() {
    let data = [0xff; 8];
    assert_eq!(BufferReader::new(&data).big_uint64(None), Ok(u64::MAX));
    assert_eq!(
        BufferReader::with_config(&data, be()).big_uint64(None),
        Ok(u64::MAX)
    );
}

#[test]
fn big_uint64() {
    let le = hex::decode("4600000001000000").unwrap();
    let mut r = BufferReader::new(&le);
    assert_eq!(r.big_uint64(None), Ok(4294967366));
    assert_eq!(r.offset(), 8);

    let be_bytes = hex::decode("0000000100000046").unwrap();
    let mut r = BufferReader::with_config(&be_bytes, be());
    assert_eq!(r.big_uint64(None), Ok(4294967366));
    assert_eq!(r.uint64_be(Some(0)), Ok(4294967366));
    assert_eq!(r.uint64_le(Some(0)), Ok(0x4600_0000_0100_0000));
}

#[test]
fn big_uint64_at_offset() {
    let mut r = BufferReader::new(&[0, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    assert_eq!(r.big_uint64(Some(2)), Ok(u64::MAX));
    assert_eq!(r.offset(), 0);
}

#[test]
fn big_int64() {
    let data = [0xff; 8];
    assert_eq!(BufferReader::new(&data).big_int64(None), Ok(-1));
    assert_eq!(BufferReader::new(&data).int64_be(None), Ok(-1));

    let data = [0x80, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(BufferReader::new(&data).int64_be(None), Ok(i64::MIN));
    assert_eq!(BufferReader::new(&data).int64_le(None), Ok(0x80));
}

#[test]
fn uint_byte_lengths() {
    let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
    let cases: &[(usize, u64, u64)] = &[
        (1, 0x01, 0x01),
        (2, 0x0201, 0x0102),
        (3, 0x03_0201, 0x01_0203),
        (4, 0x0403_0201, 0x0102_0304),
        (5, 0x05_0403_0201, 0x01_0203_0405),
        (6, 0x0605_0403_0201, 0x0102_0304_0506),
    ];
    for &(byte_length, little, big) in cases {
        let options = Options::new().with_byte_length(byte_length);
        let mut r = BufferReader::new(&data);
        assert_eq!(r.uint_le(&options), Ok(little), "byte_length {byte_length}");
        assert_eq!(r.offset(), byte_length);
        let mut r = BufferReader::new(&data);
        assert_eq!(r.uint_be(&options), Ok(big), "byte_length {byte_length}");
    }
}

#[test]
fn int_sign_extends() {
    let mut r = BufferReader::new(&[0xff, 0xff, 0xff]);
    assert_eq!(r.int_le(&Options::new().with_byte_length(3)), Ok(-1));

    let mut r = BufferReader::new(&[0x80, 0x00]);
    assert_eq!(r.int_be(&Options::new().with_byte_length(2)), Ok(-32768));

    let mut r = BufferReader::new(&[0x7f, 0xff, 0xff, 0xff, 0xff, 0xff]);
    assert_eq!(r.int_be(&Options::new()), Ok(0x7fff_ffff_ffff));
    assert_eq!(r.offset(), 6);
}

#[test]
fn int_default_byte_length() {
    let mut r = BufferReader::new(&[1, 0, 0, 0, 0, 0, 2]);
    assert_eq!(r.uint(&Options::new()), Ok(1));
    assert_eq!(r.offset(), DEFAULT_BYTE_LENGTH);

    let mut r = BufferReader::with_config(&[0, 0, 0, 0, 0, 1], be());
    assert_eq!(r.int(&Options::new()), Ok(1));
}

#[test]
fn int_bad_byte_length() {
    let mut r = BufferReader::new(&[0; 8]);
    for byte_length in [0, 7, 8] {
        let options = Options::new().with_byte_length(byte_length);
        assert_eq!(r.int(&options), Err(Error::InvalidByteLength(byte_length)));
        assert_eq!(r.uint(&options), Err(Error::InvalidByteLength(byte_length)));
    }
    assert_eq!(r.offset(), 0);
}

#[test]
fn as_string() {
    let mut r = BufferReader::new(RETURN);
    let options = Options::new().with_length(16);
    assert_eq!(r.as_string(&options), "EXPECTED RETURN!");
    assert_eq!(r.as_string(&options), "RETURN OF $2.00!");
    assert_eq!(r.offset(), 32);
    assert!(r.eob());
}

#[test]
fn utf8_ignores_encoding() {
    let mut r = BufferReader::new(RETURN);
    let options = Options::new().with_length(16).with_encoding(Encoding::Hex);
    assert_eq!(r.utf8(&options), "EXPECTED RETURN!");
    assert_eq!(r.utf8(&Options::new().with_length(16)), "RETURN OF $2.00!");
}

#[test]
fn as_string_zero_length() {
    let mut r = BufferReader::new(RETURN);
    r.skip(3);
    assert_eq!(r.as_string(&Options::new().with_length(0)), "");
    assert_eq!(r.as_string(&Options::at(1000).with_length(0)), "");
    assert_eq!(r.offset(), 3);
}

#[test]
fn as_string_without_length() {
    let mut r = BufferReader::new(RETURN);
    assert_eq!(r.as_string(&Options::new()), "EXPECTED RETURN!RETURN OF $2.00!");
    assert_eq!(r.offset(), 32);
}

#[test]
fn as_string_at_offset() {
    let mut r = BufferReader::new(&[0, 0, 0, 0, 0, 0x48, 0x45, 0x4c, 0x4c, 0x4f]);
    assert_eq!(r.as_string(&Options::at(5).with_length(5)), "HELLO");
    assert_eq!(r.offset(), 0);
}

#[test]
fn as_string_clamped() {
    let mut r = BufferReader::new(b"abc");
    r.skip(1);
    assert_eq!(r.as_string(&Options::new().with_length(10)), "bc");
    assert_eq!(r.offset(), 3);
    assert_eq!(r.as_string(&Options::new().with_length(10)), "");
    assert_eq!(r.offset(), 3);

    r.skip_to(10);
    assert_eq!(r.as_string(&Options::new()), "");
    assert_eq!(r.offset(), 10);
}

#[test]
fn as_string_encodings() {
    let mut r = BufferReader::new(&[0x68, 0x00, 0x69, 0x00, 0xe9, 0xde, 0xad]);
    let utf16 = Options::new().with_length(4).with_encoding(Encoding::Utf16Le);
    assert_eq!(r.as_string(&utf16), "hi");
    assert_eq!(
        r.as_string(&Options::at(4).with_length(1).with_encoding(Encoding::Latin1)),
        "é"
    );
    assert_eq!(
        r.as_string(&Options::at(4).with_length(1).with_encoding(Encoding::Ascii)),
        "i"
    );
    assert_eq!(
        r.as_string(&Options::new().with_encoding(Encoding::Hex)),
        "e9dead"
    );
}

#[test]
fn as_string_invalid_utf8() {
    let mut r = BufferReader::new(&[0x61, 0xff, 0x62]);
    assert_eq!(r.as_string(&Options::new()), "a\u{fffd}b");
}

#[cfg(feature = "bstr")]
#[test]
fn as_bstr() {
    let mut r = BufferReader::new(&[0x61, 0xff, 0x62, 0x63]);
    let s = r.as_bstr(&Options::new().with_length(3));
    assert_eq!(s.to_vec(), b"a\xffb");
    assert_eq!(r.offset(), 3);
    assert!(r.as_bstr(&Options::new().with_length(0)).is_empty());
    assert_eq!(r.offset(), 3);
}

#[test]
fn bytes() {
    let data = [0x20, 0x6d, 0x57, 0x68, 0x61, 0x74, 0x72, 0x72, 0x79, 0x21, 0x20];
    let mut r = BufferReader::new(&data);
    assert_eq!(
        r.bytes(&Options::at(2).with_length(9)),
        [0x57, 0x68, 0x61, 0x74, 0x72, 0x72, 0x79, 0x21, 0x20]
    );
    assert_eq!(r.bytes(&Options::new().with_length(4)), [0x20, 0x6d, 0x57, 0x68]);
    assert_eq!(r.bytes(&Options::new().with_length(1)), [0x61]);
    assert_eq!(r.offset(), 5);
}

#[test]
fn bytes_borrow_input() {
    let data = [1, 2, 3, 4];
    let mut r = BufferReader::new(&data);
    r.skip(1);
    let bytes = r.bytes(&Options::new().with_length(2));
    assert!(core::ptr::eq(bytes.as_ptr(), data[1..].as_ptr()));
}

#[test]
fn bytes_without_length() {
    let mut r = BufferReader::new(&[1, 2, 3]);
    assert!(r.bytes(&Options::new()).is_empty());
    assert!(r.bytes(&Options::new().with_length(0)).is_empty());
    assert_eq!(r.offset(), 0);
    assert_eq!(r.bytes(&Options::new().with_length(10)), [1, 2, 3]);
    assert_eq!(r.offset(), 3);
}

#[test]
fn past_end() {
    let mut r = BufferReader::new(&[0x01]);
    assert_eq!(r.uint8(None), Ok(1));
    assert_eq!(
        r.uint8(None),
        Err(Error::OutOfRange {
            offset: 1,
            size: 1,
            length: 1
        })
    );
    assert_eq!(r.offset(), 1);
}

#[test]
fn past_end_leaves_cursor() {
    let mut r = BufferReader::new(&[1, 2, 3]);
    r.skip(2);
    assert!(r.uint16(None).is_err());
    assert!(r.big_uint64(None).is_err());
    assert!(r.datetime(&Options::new()).is_err());
    assert!(r.sfloat12_16(None).is_err());
    assert!(r.uint(&Options::new().with_byte_length(2)).is_err());
    assert_eq!(r.offset(), 2);
    assert_eq!(r.uint8(None), Ok(3));
}

#[test]
fn past_end_every_width() {
    for size in [1, 2, 4, 8] {
        for prefix in ["Int", "UInt"] {
            for big_endian in [false, true] {
                for offset in [None, Some(20)] {
                    let name = format!("{prefix}{}", size * 8);
                    let data = vec![0; offset.unwrap_or(0) + size - 1];
                    let config = Config::default().with_big_endian(big_endian);
                    let mut r = BufferReader::with_config(&data, config);
                    let options = Options {
                        offset,
                        ..Options::new()
                    };
                    let result = r.io(&name, &options);
                    assert!(
                        matches!(result, Err(Error::OutOfRange { .. })),
                        "{name} {big_endian} {offset:?}: {result:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn read_and_advance() {
    let mut r = BufferReader::new(&[1, 2, 3, 4]);
    let pair = r.read_and_advance(2, None, |data, at| Ok((data[at], data[at + 1])));
    assert_eq!(pair, Ok((1, 2)));
    assert_eq!(r.offset(), 2);

    let failed: Result<u8> = r.read_and_advance(1, None, |_, at| {
        Err(Error::OutOfRange {
            offset: at,
            size: 1,
            length: 0,
        })
    });
    assert!(failed.is_err());
    assert_eq!(r.offset(), 2);
}
