//! The Bluetooth GATT `date_time` characteristic (UUID 0x2A08).
//!
//! The wire format is 7 bytes: a 16-bit year followed by month (1-12), day (1-31), hours,
//! minutes and seconds as single bytes. A year, month or day of 0 means "not known".

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

/// Size of an encoded date-time.
pub const DATE_TIME_SIZE: usize = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// The components of a date-time exactly as they appear on the wire. `month` is 1-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct DateTimeFields {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// A decoded date-time.
///
/// A date whose year, month and day are all known is returned as a UTC timestamp. Anything else
/// cannot be placed on a timeline and is returned as its raw components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateTime {
    /// A complete date, as a UTC timestamp.
    Full(SystemTime),
    /// A date with an unknown year, month or day.
    Partial(DateTimeFields),
}

impl DateTime {
    /// Classifies decoded components: complete dates become [`DateTime::Full`].
    pub fn from_fields(fields: DateTimeFields) -> Result<Self> {
        if fields.is_complete() {
            Ok(Self::Full(fields.to_system_time()?))
        } else {
            Ok(Self::Partial(fields))
        }
    }

    /// The components to put on the wire. Timestamps are split in UTC.
    pub fn fields(&self) -> Result<DateTimeFields> {
        match self {
            Self::Full(time) => DateTimeFields::from_system_time(*time),
            Self::Partial(fields) => Ok(*fields),
        }
    }
}

impl From<SystemTime> for DateTime {
    fn from(time: SystemTime) -> Self {
        Self::Full(time)
    }
}

impl From<DateTimeFields> for DateTime {
    fn from(fields: DateTimeFields) -> Self {
        Self::Partial(fields)
    }
}

impl DateTimeFields {
    /// `true` if year, month and day are all known (non-zero).
    pub fn is_complete(&self) -> bool {
        self.year != 0 && self.month != 0 && self.day != 0
    }

    /// Converts the components to a UTC timestamp.
    ///
    /// Out-of-range components carry over the way calendar arithmetic does: month 13 is January
    /// of the next year, day 32 of January is February 1st, hour 24 is midnight of the next day.
    pub fn to_system_time(&self) -> Result<SystemTime> {
        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) as u32 + 1;
        let days = days_from_civil(year, month, 1) + i64::from(self.day) - 1;
        let seconds = days * SECONDS_PER_DAY
            + i64::from(self.hours) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);
        from_unix_seconds(seconds)
    }

    /// Splits a timestamp into UTC components. Sub-second precision is truncated.
    pub fn from_system_time(time: SystemTime) -> Result<Self> {
        let seconds = unix_seconds(time)?;
        let (year, month, day) = civil_from_days(seconds.div_euclid(SECONDS_PER_DAY));
        let time_of_day = seconds.rem_euclid(SECONDS_PER_DAY);
        Ok(Self {
            year: u16::try_from(year).map_err(|_| Error::DateOutOfRange)?,
            month: month as u8,
            day: day as u8,
            hours: (time_of_day / 3600) as u8,
            minutes: (time_of_day % 3600 / 60) as u8,
            seconds: (time_of_day % 60) as u8,
        })
    }

    /// Encodes the components. Only the year depends on `big_endian`.
    pub fn to_bytes(&self, big_endian: bool) -> [u8; DATE_TIME_SIZE] {
        let year = if big_endian {
            self.year.to_be_bytes()
        } else {
            self.year.to_le_bytes()
        };
        [
            year[0],
            year[1],
            self.month,
            self.day,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    /// Decodes the components.
    pub fn from_bytes(bytes: [u8; DATE_TIME_SIZE], big_endian: bool) -> Self {
        let year = [bytes[0], bytes[1]];
        Self {
            year: if big_endian {
                u16::from_be_bytes(year)
            } else {
                u16::from_le_bytes(year)
            },
            month: bytes[2],
            day: bytes[3],
            hours: bytes[4],
            minutes: bytes[5],
            seconds: bytes[6],
        }
    }
}

fn unix_seconds(time: SystemTime) -> Result<i64> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).map_err(|_| Error::DateOutOfRange),
        Err(before) => {
            let before = before.duration();
            let whole = i64::try_from(before.as_secs()).map_err(|_| Error::DateOutOfRange)?;
            // round towards the past so 00:00:00.5 before the epoch is 23:59:59
            Ok(if before.subsec_nanos() > 0 {
                -whole - 1
            } else {
                -whole
            })
        }
    }
}

fn from_unix_seconds(seconds: i64) -> Result<SystemTime> {
    let span = Duration::from_secs(seconds.unsigned_abs());
    let time = if seconds >= 0 {
        UNIX_EPOCH.checked_add(span)
    } else {
        UNIX_EPOCH.checked_sub(span)
    };
    time.ok_or(Error::DateOutOfRange)
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month = i64::from(month);
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Proleptic Gregorian `(year, month, day)` of a day count since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u32;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    } as u32;
    let year = year_of_era + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}
