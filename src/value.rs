use core::mem::size_of;

use strum::IntoStaticStr;

use crate::{DateTime, Error, Kind, Result};

/// A dynamically typed value, as produced and consumed by the name-based `io` entry points.
#[derive(Clone, Debug, PartialEq, IntoStaticStr)]
pub enum Value {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A raw byte sequence.
    Bytes(Vec<u8>),
    /// Text.
    Text(String),
    /// A date-time.
    DateTime(DateTime),
}

impl Value {
    /// The name of the variant, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        self.into()
    }

    /// The value as an `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(n) => Some(n),
            Self::UInt(n) => i64::try_from(n).ok(),
            _ => None,
        }
    }

    /// The value as a `u64`, if it is an integer that fits.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::Int(n) => u64::try_from(n).ok(),
            Self::UInt(n) => Some(n),
            _ => None,
        }
    }

    /// The value as an `f64`. Integers are converted, possibly losing precision.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(n) => Some(n as f64),
            Self::UInt(n) => Some(n as f64),
            Self::Float(x) => Some(x),
            _ => None,
        }
    }

    /// The bytes of a [`Value::Bytes`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The text of a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The date-time of a [`Value::DateTime`].
    pub fn as_datetime(&self) -> Option<DateTime> {
        match self {
            Self::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    fn mismatch(&self, kind: Kind) -> Error {
        Error::TypeMismatch {
            kind,
            found: self.variant_name(),
        }
    }

    /// Converts the value for an integer kind. Text is parsed; floats must be integral.
    pub(crate) fn integer(&self, kind: Kind) -> Result<i128> {
        match self {
            Self::Int(n) => Ok(i128::from(*n)),
            Self::UInt(n) => Ok(i128::from(*n)),
            Self::Text(text) => Integer::Text(text).normalize(),
            Self::Float(x) if x.fract() == 0.0 && x.abs() < 2f64.powi(127) => Ok(*x as i128),
            _ => Err(self.mismatch(kind)),
        }
    }

    pub(crate) fn float(&self, kind: Kind) -> Result<f64> {
        match self {
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| Error::InvalidNumber(text.clone())),
            _ => self.as_f64().ok_or_else(|| self.mismatch(kind)),
        }
    }

    pub(crate) fn into_bytes(self, kind: Kind) -> Result<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::Text(text) => Ok(text.into_bytes()),
            _ => Err(self.mismatch(kind)),
        }
    }

    pub(crate) fn into_text(self, kind: Kind) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            _ => Err(self.mismatch(kind)),
        }
    }

    pub(crate) fn into_datetime(self, kind: Kind) -> Result<DateTime> {
        self.as_datetime().ok_or_else(|| self.mismatch(kind))
    }
}

macro_rules! value_from {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

value_from!(Int: i8, i16, i32, i64);
value_from!(UInt: u8, u16, u32, u64);
value_from!(Float: f32, f64);
value_from!(Bytes: Vec<u8>, &[u8]);
value_from!(Text: String, &str);
value_from!(DateTime: DateTime);

/// An integer argument of the variable-width integer writers.
///
/// Native integers convert with `into()`. Text holds a decimal integer with an optional sign,
/// leading zeros and surrounding whitespace, so `"00042"`, `" -7 "` and `"+3"` are all accepted.
/// Decimal or exponent notation is accepted when the number it spells is a whole number, so
/// `"1.0"` and `"1e3"` are 1 and 1000 while `"4.5"` is rejected. Hexadecimal, `inf` and `NaN` are
/// not numbers here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integer<'s> {
    /// A native integer.
    Number(i128),
    /// A decimal integer in text form.
    Text(&'s str),
}

impl Integer<'_> {
    /// Resolves the integer. Fails with [`Error::InvalidNumber`] if text is not an integer.
    pub fn normalize(self) -> Result<i128> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed.parse().or_else(|_| match trimmed.parse::<f64>() {
                    Ok(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 2f64.powi(127) => {
                        Ok(x as i128)
                    }
                    _ => Err(Error::InvalidNumber(text.to_owned())),
                })
            }
        }
    }
}

macro_rules! integer_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer<'_> {
                fn from(value: $t) -> Self {
                    Self::Number(value as i128)
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl<'s> From<&'s str> for Integer<'s> {
    fn from(text: &'s str) -> Self {
        Self::Text(text)
    }
}

impl<'s> From<&'s String> for Integer<'s> {
    fn from(text: &'s String) -> Self {
        Self::Text(text)
    }
}

/// Smallest and largest value of an integer field of `bytes` bytes.
pub(crate) fn bounds(bytes: usize, signed: bool) -> (i128, i128) {
    let bits = 8 * bytes as u32;
    if signed {
        (-(1 << (bits - 1)), (1 << (bits - 1)) - 1)
    } else {
        (0, (1 << bits) - 1)
    }
}

/// Fails with [`Error::ValueOutOfRange`] unless `value` fits an integer field of `bytes` bytes.
pub(crate) fn check_range(value: i128, bytes: usize, signed: bool) -> Result<i128> {
    let (min, max) = bounds(bytes, signed);
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::ValueOutOfRange { value, min, max })
    }
}

/// Converts `value` to a native integer type, reporting the bounds of `T` on failure.
pub(crate) fn narrow<T: TryFrom<i128>>(value: i128, signed: bool) -> Result<T> {
    T::try_from(value).map_err(|_| {
        let (min, max) = bounds(size_of::<T>(), signed);
        Error::ValueOutOfRange { value, min, max }
    })
}
