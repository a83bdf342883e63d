use crate::ieee754::SINGLE;
use crate::{Encoding, Error, Result};

/// Byte length used by the variable-width integer accessors when none is given.
pub const DEFAULT_BYTE_LENGTH: usize = 6;

/// Per-call parameters for the accessors that need more than an offset.
///
/// Every field is optional; accessors document which fields they read and ignore the rest, so a
/// single `Options` value can drive any kind through `io`.
///
/// ```
/// use buffer_io::{BufferReader, Options};
///
/// let mut reader = BufferReader::new(b"\0\0HELLO");
/// let text = reader.as_string(&Options::at(2).with_length(5));
/// assert_eq!(text, "HELLO");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Explicit position. When set, the cursor is neither used nor moved.
    pub offset: Option<usize>,
    /// Number of bytes for strings and byte sequences.
    pub length: Option<usize>,
    /// Text encoding for `AsString`. Defaults to UTF-8.
    pub encoding: Option<Encoding>,
    /// Width of `Int`/`UInt` values, `1..=6`. Defaults to [`DEFAULT_BYTE_LENGTH`].
    pub byte_length: Option<usize>,
    /// Byte order of the year field of `datetime`. Defaults to the reader/writer byte order.
    pub big_endian: Option<bool>,
    /// Byte order of `ieee754`. Defaults to the reader/writer byte order.
    pub little_endian: Option<bool>,
    /// Mantissa width of `ieee754` values. Defaults to 23.
    pub mantissa_bits: Option<u32>,
    /// Total size of `ieee754` values. Defaults to 4.
    pub total_bytes: Option<usize>,
}

impl Options {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with only an explicit offset.
    pub fn at(offset: usize) -> Self {
        Self::new().with_offset(offset)
    }

    /// Sets an explicit offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the byte length of a string or byte sequence.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the text encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Sets the width of a variable-width integer.
    pub fn with_byte_length(mut self, byte_length: usize) -> Self {
        self.byte_length = Some(byte_length);
        self
    }

    /// Overrides the byte order of the `datetime` year field.
    pub fn with_big_endian(mut self, big_endian: bool) -> Self {
        self.big_endian = Some(big_endian);
        self
    }

    /// Overrides the byte order of `ieee754`.
    pub fn with_little_endian(mut self, little_endian: bool) -> Self {
        self.little_endian = Some(little_endian);
        self
    }

    /// Sets the layout of `ieee754` values.
    pub fn with_layout(mut self, mantissa_bits: u32, total_bytes: usize) -> Self {
        self.mantissa_bits = Some(mantissa_bits);
        self.total_bytes = Some(total_bytes);
        self
    }

    pub(crate) fn byte_length(&self) -> Result<usize> {
        match self.byte_length.unwrap_or(DEFAULT_BYTE_LENGTH) {
            n @ 1..=6 => Ok(n),
            n => Err(Error::InvalidByteLength(n)),
        }
    }

    pub(crate) fn layout(&self) -> (u32, usize) {
        (
            self.mantissa_bits.unwrap_or(SINGLE.0),
            self.total_bytes.unwrap_or(SINGLE.1),
        )
    }
}
