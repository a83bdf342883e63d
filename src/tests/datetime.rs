use super::*;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 2021-03-04 05:06:07 UTC
const MARCH_4_2021: u64 = 1_614_834_367;

fn at(seconds: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(seconds)
}

#[test]
fn write_timestamp_le() {
    let mut w = zeroed(0);
    w.datetime(at(MARCH_4_2021), &Options::new()).unwrap();
    assert_eq!(hex::encode(&w.out), "e5070304050607");
    assert_eq!(w.offset(), DATE_TIME_SIZE);

    let mut r = BufferReader::new(&w.out);
    assert_eq!(r.datetime(&Options::new()), Ok(DateTime::Full(at(MARCH_4_2021))));
    assert!(r.eob());
}

#[test]
fn write_timestamp_be() {
    let mut w = zeroed_be(0);
    w.datetime(at(MARCH_4_2021), &Options::new()).unwrap();
    assert_eq!(hex::encode(&w.out), "07e50304050607");

    let mut r = BufferReader::with_config(&w.out, be());
    assert_eq!(r.datetime(&Options::new()), Ok(DateTime::Full(at(MARCH_4_2021))));
}

#[test]
fn year_byte_order_override() {
    let mut w = zeroed(0);
    w.datetime(at(MARCH_4_2021), &Options::new().with_big_endian(true))
        .unwrap()
        .datetime(at(MARCH_4_2021), &Options::new().with_big_endian(false))
        .unwrap();
    assert_eq!(hex::encode(&w.out), "07e50304050607e5070304050607");

    let mut r = BufferReader::new(&w.out);
    let options = Options::new().with_big_endian(true);
    assert_eq!(r.datetime(&options), Ok(DateTime::Full(at(MARCH_4_2021))));

    // the wrong byte order still decodes, just to a different year
    let wrong = r.datetime(&options).unwrap();
    assert_eq!(wrong.fields().unwrap().year, 0xe507);
}

#[test]
fn explicit_offset() {
    let mut w = zeroed(10);
    w.datetime(at(MARCH_4_2021), &Options::at(3)).unwrap();
    assert_eq!(w.offset(), 0);
    assert_eq!(w.length(), 10);
    assert_eq!(hex::encode(&w.out), "000000e5070304050607");

    let mut r = BufferReader::new(&w.out);
    assert_eq!(r.datetime(&Options::at(3)), Ok(DateTime::Full(at(MARCH_4_2021))));
    assert_eq!(r.offset(), 0);
}

#[test]
fn partial_dates() {
    for bytes in [
        [0, 0, 3, 4, 5, 6, 7],
        [0xe5, 0x07, 0, 4, 5, 6, 7],
        [0xe5, 0x07, 3, 0, 5, 6, 7],
    ] {
        let mut r = BufferReader::new(&bytes);
        let value = r.datetime(&Options::new()).unwrap();
        let fields = DateTimeFields::from_bytes(bytes, false);
        assert!(!fields.is_complete());
        assert_eq!(value, DateTime::Partial(fields));

        let mut w = zeroed(0);
        w.datetime(value, &Options::new()).unwrap();
        assert_eq!(w.out, bytes);
    }
}

#[test]
fn partial_fields_are_written_as_given() {
    let fields = DateTimeFields {
        year: 2021,
        month: 0,
        day: 31,
        hours: 25,
        minutes: 0,
        seconds: 61,
    };
    let mut w = zeroed_be(0);
    w.datetime(fields, &Options::new()).unwrap();
    assert_eq!(hex::encode(&w.out), "07e5001f19003d");
}

#[test]
fn sub_seconds_are_truncated() {
    let mut w = zeroed(0);
    w.datetime(
        UNIX_EPOCH + Duration::new(MARCH_4_2021, 999_000_000),
        &Options::new(),
    )
    .unwrap();
    assert_eq!(hex::encode(&w.out), "e5070304050607");
}

#[test]
fn leap_day() {
    let mut w = zeroed(0);
    w.datetime(at(1_583_020_799), &Options::new()).unwrap();
    assert_eq!(hex::encode(&w.out), "e407021d173b3b");

    let mut r = BufferReader::new(&w.out);
    assert_eq!(r.datetime(&Options::new()), Ok(DateTime::Full(at(1_583_020_799))));
}

#[test]
fn before_the_epoch() {
    let mut w = zeroed(0);
    w.datetime(UNIX_EPOCH - Duration::from_secs(1), &Options::new())
        .unwrap()
        .datetime(UNIX_EPOCH - Duration::from_millis(500), &Options::new())
        .unwrap();
    assert_eq!(hex::encode(&w.out), "b1070c1f173b3bb1070c1f173b3b");

    let mut r = BufferReader::new(&w.out);
    assert_eq!(
        r.datetime(&Options::new()),
        Ok(DateTime::Full(UNIX_EPOCH - Duration::from_secs(1)))
    );
}

#[test]
fn components_carry_over() {
    let fields = DateTimeFields {
        year: 2020,
        month: 13,
        day: 1,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
    assert_eq!(fields.to_system_time(), Ok(at(1_609_459_200)));

    let fields = DateTimeFields {
        year: 2021,
        month: 1,
        day: 32,
        hours: 24,
        minutes: 0,
        seconds: 0,
    };
    // February 2nd, midnight
    assert_eq!(fields.to_system_time(), Ok(at(1_609_459_200 + 32 * 86_400)));

    let mut r = BufferReader::new(&[0xe4, 0x07, 13, 1, 0, 0, 0]);
    assert_eq!(r.datetime(&Options::new()), Ok(DateTime::Full(at(1_609_459_200))));
}

#[test]
fn fields_from_timestamp() {
    let fields = DateTimeFields::from_system_time(at(MARCH_4_2021)).unwrap();
    assert_eq!(
        fields,
        DateTimeFields {
            year: 2021,
            month: 3,
            day: 4,
            hours: 5,
            minutes: 6,
            seconds: 7,
        }
    );
    assert!(fields.is_complete());
    assert_eq!(fields.to_system_time(), Ok(at(MARCH_4_2021)));
    assert_eq!(DateTime::from_fields(fields), Ok(DateTime::Full(at(MARCH_4_2021))));
}

#[test]
fn year_out_of_range() {
    // 65536-01-01
    let too_late = at(2_005_949_145_600);
    let mut w = zeroed(0);
    assert_eq!(
        w.datetime(too_late, &Options::new()).map(|_| ()),
        Err(Error::DateOutOfRange)
    );
    assert_eq!(w.length(), 0);
    assert_eq!(w.offset(), 0);
}

#[test]
fn read_past_end() {
    let mut r = BufferReader::new(&[0xe5, 0x07, 3, 4, 5, 6]);
    assert_eq!(
        r.datetime(&Options::new()),
        Err(Error::OutOfRange {
            offset: 0,
            size: DATE_TIME_SIZE,
            length: 6
        })
    );
    assert_eq!(r.offset(), 0);
}

#[test]
fn value_conversions() {
    let full = DateTime::from(at(MARCH_4_2021));
    assert_eq!(full, DateTime::Full(at(MARCH_4_2021)));

    let fields = DateTimeFields::default();
    assert_eq!(DateTime::from(fields), DateTime::Partial(fields));
    assert_eq!(DateTime::Partial(fields).fields(), Ok(fields));
}
