use super::*;

const A1_A9: [u8; 9] = [0xa1, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9];

fn after_two_reads() -> BufferReader<'static> {
    let mut r = BufferReader::new(&A1_A9);
    assert_eq!(r.uint8(None), Ok(0xa1));
    assert_eq!(r.uint8(None), Ok(0xa2));
    r
}

#[test]
fn slice_to_end() {
    let r = after_two_reads();
    assert_eq!(hex::encode(r.slice(0, None)), "a3a4a5a6a7a8a9");
}

#[test]
fn slice_from_index() {
    let r = after_two_reads();
    assert_eq!(hex::encode(r.slice(2, None)), "a5a6a7a8a9");
}

#[test]
fn slice_between_indexes() {
    let r = after_two_reads();
    assert_eq!(hex::encode(r.slice(2, Some(5))), "a5a6a7");
}

#[test]
fn slice_clamped_to_end() {
    let r = after_two_reads();
    assert_eq!(hex::encode(r.slice(2, Some(20))), "a5a6a7a8a9");
    assert!(r.slice(20, None).is_empty());
}

#[test]
fn slice_end_zero_means_to_end() {
    let r = after_two_reads();
    assert_eq!(r.slice(0, Some(0)), r.slice(0, None));
}

#[test]
fn slice_borrows() {
    let r = after_two_reads();
    assert!(core::ptr::eq(r.slice(0, None).as_ptr(), A1_A9[2..].as_ptr()));
}

#[test]
fn eob() {
    let mut r = BufferReader::new(&A1_A9);
    assert_eq!(r.uint8(None), Ok(0xa1));
    assert!(!r.eob());
    r.set_offset(r.length());
    assert!(r.eob());
    r.skip(5);
    assert!(r.eob());
}

#[test]
fn length() {
    let r = BufferReader::new(&A1_A9);
    assert_eq!(r.length(), 9);
    assert_eq!(r.buffer(), A1_A9);

    let w = BufferWriter::new();
    assert_eq!(w.length(), DEFAULT_SIZE);
}

#[test]
fn is_range_error() {
    let r = BufferReader::new(&A1_A9);
    let len = r.length();
    assert!(!r.is_range_error(len, 0));
    assert!(!r.is_range_error(len - 5, len - 5));
    assert!(r.is_range_error(len + 1, len));
    assert!(r.is_range_error(1, len));
    assert!(!r.is_range_error(0, len));
    assert!(r.is_range_error(1, usize::MAX));
}

#[test]
fn is_range_error_never_grows() {
    let w = zeroed(4);
    assert!(w.is_range_error(8, 0));
    assert_eq!(w.length(), 4);
}

#[test]
fn skip() {
    let mut r = BufferReader::new(&A1_A9);
    r.skip(4);
    assert_eq!(r.offset(), 4);
    r.skip(-3);
    assert_eq!(r.offset(), 1);
    r.skip(-3);
    assert_eq!(r.offset(), 0);
}

#[test]
fn skip_to() {
    let mut r = BufferReader::new(&A1_A9);
    r.skip(4);
    assert_eq!(r.offset(), 4);
    r.skip_to(6);
    assert_eq!(r.offset(), 6);
    assert_eq!(r.uint8(None), Ok(0xa7));
}

#[test]
fn trim() {
    let mut w = zeroed(10);
    w.utf8("HELLO", &Options::new()).unwrap();
    assert_eq!(w.trim(), b"HELLO");
    w.skip_to(30);
    assert_eq!(w.trim().len(), 10);
}

#[test]
fn config() {
    let config = Config::default();
    assert_eq!(config.offset, 0);
    assert!(!config.big_endian);
    assert_eq!(config.size, 20);

    let r = BufferReader::with_config(&A1_A9, config.with_offset(3).with_big_endian(true));
    assert_eq!(r.offset(), 3);
    assert!(r.is_big_endian());

    let w = BufferWriter::default();
    assert_eq!(w.buffer(), [0; 20]);
    assert_eq!(w.offset(), 0);
    assert!(!w.is_big_endian());
}
