use thiserror::Error;

use crate::Kind;

/// The error type for every fallible operation of `BufferReader` and `BufferWriter`.
///
/// Bounds failures are reported as [`Error::OutOfRange`]. Encoders distinguish a value of the
/// wrong type ([`Error::InvalidNumber`], [`Error::TypeMismatch`]) from a value of the right type
/// that does not fit the target field ([`Error::ValueOutOfRange`]).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The bytes `offset..offset + size` are not inside a buffer of `length` bytes.
    ///
    /// Reads never grow the buffer, so reading past the end always fails with this error. Writes
    /// grow the buffer first and only fail with it when `offset + size` overflows.
    #[error("range {offset}..{offset}+{size} is outside of a buffer of {length} bytes")]
    OutOfRange {
        /// First byte of the requested range.
        offset: usize,
        /// Number of bytes requested.
        size: usize,
        /// Length of the buffer at the time of the request.
        length: usize,
    },

    /// A string given to an integer encoder does not contain a decimal integer.
    #[error("'{0}' is not an integer")]
    InvalidNumber(String),

    /// An integer does not fit the field it is written to.
    #[error("value {value} is out of range {min}..={max}")]
    ValueOutOfRange {
        /// The offending value.
        value: i128,
        /// Smallest value the field can hold.
        min: i128,
        /// Largest value the field can hold.
        max: i128,
    },

    /// The byte length of a variable-width integer is not in `1..=6`.
    #[error("byte length {0} is not in 1..=6")]
    InvalidByteLength(usize),

    /// The mantissa width and total size do not describe a usable floating point layout.
    #[error("{mantissa_bits} mantissa bits in {total_bytes} bytes is not a valid float layout")]
    InvalidFloatLayout {
        /// Requested mantissa width in bits.
        mantissa_bits: u32,
        /// Requested total size in bytes.
        total_bytes: usize,
    },

    /// A kind name passed to `io` does not name any kind.
    #[error("unknown kind '{0}'")]
    UnknownKind(String),

    /// An encoding name does not name a supported encoding.
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    /// A dynamically typed value cannot be written as the requested kind.
    #[error("{kind} cannot be written from a {found} value")]
    TypeMismatch {
        /// The kind being written.
        kind: Kind,
        /// The variant of the value that was supplied.
        found: &'static str,
    },

    /// A string written with the hex encoding is not valid hex.
    #[error("invalid hex string")]
    InvalidHex,

    /// A date-time cannot be represented, either as a timestamp or in the 7-byte wire format.
    #[error("date-time is out of the representable range")]
    DateOutOfRange,
}

/// Result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;
