use core::mem::size_of;

use zerocopy::byteorder::{BE, F32, F64, I16, I32, I64, LE, U16, U32, U64};
use zerocopy::FromBytes;

use crate::datetime::DATE_TIME_SIZE;
use crate::ieee754::{unpack_float, FLOAT24_32, SFLOAT12_16};
use crate::io::{field, load, load_uint};
use crate::{BufferIo, Config, DateTime, DateTimeFields, Encoding, Kind, Options, Result, Value};

/// Reads values from a slice of bytes through a cursor.
///
/// Every accessor reads at an explicit offset when one is given and leaves the cursor alone;
/// otherwise it reads at the cursor and advances it past the value. Accessors without a `_be` or
/// `_le` suffix use the byte order chosen at construction.
///
/// Reads never go past the end of `data`. A read that would do so fails with
/// [`Error::OutOfRange`](crate::Error::OutOfRange) and leaves the cursor where it was. Strings and
/// byte sequences are the exception: their length is clamped to the data that is available.
///
/// The reader borrows its input, so [`BufferReader::bytes`] returns sub-slices of `data` without
/// copying them.
#[derive(Clone, Debug)]
pub struct BufferReader<'a> {
    /// The input data being decoded.
    pub data: &'a [u8],
    offset: usize,
    big_endian: bool,
}

impl BufferIo for BufferReader<'_> {
    fn buffer(&self) -> &[u8] {
        self.data
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    fn is_big_endian(&self) -> bool {
        self.big_endian
    }
}

impl<'a> BufferReader<'a> {
    /// Creates a little-endian reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, Config::default())
    }

    /// Creates a reader with the given initial offset and byte order.
    pub fn with_config(data: &'a [u8], config: Config) -> Self {
        Self {
            data,
            offset: config.offset,
            big_endian: config.big_endian,
        }
    }

    /// Runs `decode` at the explicit `offset` or, when there is none, at the cursor. In the
    /// second case the cursor is advanced by `size` once `decode` succeeds.
    ///
    /// `decode` receives the whole input and the position to read at and is responsible for its
    /// own bounds checks.
    pub fn read_and_advance<T>(
        &mut self,
        size: usize,
        offset: Option<usize>,
        decode: impl FnOnce(&'a [u8], usize) -> Result<T>,
    ) -> Result<T> {
        let at = offset.unwrap_or(self.offset);
        let value = decode(self.data, at)?;
        if offset.is_none() {
            self.offset = at.saturating_add(size);
        }
        Ok(value)
    }

    #[inline(always)]
    fn fixed<T: FromBytes>(&mut self, offset: Option<usize>) -> Result<T> {
        self.read_and_advance(size_of::<T>(), offset, load::<T>)
    }

    /// The bytes at `offset` (or the cursor), at most `length` of them or up to the end of the
    /// input. The cursor advances by the number of bytes returned.
    fn span(&mut self, offset: Option<usize>, length: Option<usize>) -> &'a [u8] {
        let data = self.data;
        let at = offset.unwrap_or(self.offset).min(data.len());
        let end = length.map_or(data.len(), |n| at.saturating_add(n).min(data.len()));
        let bytes = data.get(at..end).unwrap_or_default();
        if offset.is_none() {
            self.offset = self.offset.saturating_add(bytes.len());
        }
        bytes
    }

    /// Reads a single `i8` value.
    pub fn int8(&mut self, offset: Option<usize>) -> Result<i8> {
        self.fixed(offset)
    }

    /// Reads a single `u8` value.
    pub fn uint8(&mut self, offset: Option<usize>) -> Result<u8> {
        self.fixed(offset)
    }

    /// Reads an `i16` in the reader's byte order.
    pub fn int16(&mut self, offset: Option<usize>) -> Result<i16> {
        if self.big_endian {
            self.int16_be(offset)
        } else {
            self.int16_le(offset)
        }
    }

    /// Reads an `i16` in big-endian byte order.
    pub fn int16_be(&mut self, offset: Option<usize>) -> Result<i16> {
        Ok(self.fixed::<I16<BE>>(offset)?.get())
    }

    /// Reads an `i16` in little-endian byte order.
    pub fn int16_le(&mut self, offset: Option<usize>) -> Result<i16> {
        Ok(self.fixed::<I16<LE>>(offset)?.get())
    }

    /// Reads a `u16` in the reader's byte order.
    pub fn uint16(&mut self, offset: Option<usize>) -> Result<u16> {
        if self.big_endian {
            self.uint16_be(offset)
        } else {
            self.uint16_le(offset)
        }
    }

    /// Reads a `u16` in big-endian byte order.
    pub fn uint16_be(&mut self, offset: Option<usize>) -> Result<u16> {
        Ok(self.fixed::<U16<BE>>(offset)?.get())
    }

    /// Reads a `u16` in little-endian byte order.
    pub fn uint16_le(&mut self, offset: Option<usize>) -> Result<u16> {
        Ok(self.fixed::<U16<LE>>(offset)?.get())
    }

    /// Reads an `i32` in the reader's byte order.
    pub fn int32(&mut self, offset: Option<usize>) -> Result<i32> {
        if self.big_endian {
            self.int32_be(offset)
        } else {
            self.int32_le(offset)
        }
    }

    /// Reads an `i32` in big-endian byte order.
    pub fn int32_be(&mut self, offset: Option<usize>) -> Result<i32> {
        Ok(self.fixed::<I32<BE>>(offset)?.get())
    }

    /// Reads an `i32` in little-endian byte order.
    pub fn int32_le(&mut self, offset: Option<usize>) -> Result<i32> {
        Ok(self.fixed::<I32<LE>>(offset)?.get())
    }

    /// Reads a `u32` in the reader's byte order.
    pub fn uint32(&mut self, offset: Option<usize>) -> Result<u32> {
        if self.big_endian {
            self.uint32_be(offset)
        } else {
            self.uint32_le(offset)
        }
    }

    /// Reads a `u32` in big-endian byte order.
    pub fn uint32_be(&mut self, offset: Option<usize>) -> Result<u32> {
        Ok(self.fixed::<U32<BE>>(offset)?.get())
    }

    /// Reads a `u32` in little-endian byte order.
    pub fn uint32_le(&mut self, offset: Option<usize>) -> Result<u32> {
        Ok(self.fixed::<U32<LE>>(offset)?.get())
    }

    /// Reads a signed integer of `options.byte_length` bytes (1 to 6, default 6) in the reader's
    /// byte order.
    ///
    /// Reads `offset` and `byte_length` from `options`.
    pub fn int(&mut self, options: &Options) -> Result<i64> {
        self.var_int(options, !self.big_endian)
    }

    /// Reads a big-endian signed integer of `options.byte_length` bytes.
    pub fn int_be(&mut self, options: &Options) -> Result<i64> {
        self.var_int(options, false)
    }

    /// Reads a little-endian signed integer of `options.byte_length` bytes.
    pub fn int_le(&mut self, options: &Options) -> Result<i64> {
        self.var_int(options, true)
    }

    /// Reads an unsigned integer of `options.byte_length` bytes (1 to 6, default 6) in the
    /// reader's byte order.
    ///
    /// Reads `offset` and `byte_length` from `options`.
    pub fn uint(&mut self, options: &Options) -> Result<u64> {
        self.var_uint(options, !self.big_endian)
    }

    /// Reads a big-endian unsigned integer of `options.byte_length` bytes.
    pub fn uint_be(&mut self, options: &Options) -> Result<u64> {
        self.var_uint(options, false)
    }

    /// Reads a little-endian unsigned integer of `options.byte_length` bytes.
    pub fn uint_le(&mut self, options: &Options) -> Result<u64> {
        self.var_uint(options, true)
    }

    fn var_uint(&mut self, options: &Options, little_endian: bool) -> Result<u64> {
        let size = options.byte_length()?;
        self.read_and_advance(size, options.offset, |data, at| {
            Ok(load_uint(field(data, at, size)?, little_endian))
        })
    }

    fn var_int(&mut self, options: &Options, little_endian: bool) -> Result<i64> {
        let size = options.byte_length()?;
        let raw = self.var_uint(options, little_endian)?;
        // sign-extend from the top bit of the field
        let shift = 64 - 8 * size as u32;
        Ok(((raw << shift) as i64) >> shift)
    }

    /// Reads an `i64` in the reader's byte order.
    pub fn big_int64(&mut self, offset: Option<usize>) -> Result<i64> {
        if self.big_endian {
            self.big_int64_be(offset)
        } else {
            self.big_int64_le(offset)
        }
    }

    /// Reads an `i64` in big-endian byte order.
    pub fn big_int64_be(&mut self, offset: Option<usize>) -> Result<i64> {
        Ok(self.fixed::<I64<BE>>(offset)?.get())
    }

    /// Reads an `i64` in little-endian byte order.
    pub fn big_int64_le(&mut self, offset: Option<usize>) -> Result<i64> {
        Ok(self.fixed::<I64<LE>>(offset)?.get())
    }

    /// Reads a `u64` in the reader's byte order.
    pub fn big_uint64(&mut self, offset: Option<usize>) -> Result<u64> {
        if self.big_endian {
            self.big_uint64_be(offset)
        } else {
            self.big_uint64_le(offset)
        }
    }

    /// Reads a `u64` in big-endian byte order.
    pub fn big_uint64_be(&mut self, offset: Option<usize>) -> Result<u64> {
        Ok(self.fixed::<U64<BE>>(offset)?.get())
    }

    /// Reads a `u64` in little-endian byte order.
    pub fn big_uint64_le(&mut self, offset: Option<usize>) -> Result<u64> {
        Ok(self.fixed::<U64<LE>>(offset)?.get())
    }

    /// Same as [`BufferReader::big_int64`].
    pub fn int64(&mut self, offset: Option<usize>) -> Result<i64> {
        self.big_int64(offset)
    }

    /// Same as [`BufferReader::big_int64_be`].
    pub fn int64_be(&mut self, offset: Option<usize>) -> Result<i64> {
        self.big_int64_be(offset)
    }

    /// Same as [`BufferReader::big_int64_le`].
    pub fn int64_le(&mut self, offset: Option<usize>) -> Result<i64> {
        self.big_int64_le(offset)
    }

    /// Same as [`BufferReader::big_uint64`].
    pub fn uint64(&mut self, offset: Option<usize>) -> Result<u64> {
        self.big_uint64(offset)
    }

    /// Same as [`BufferReader::big_uint64_be`].
    pub fn uint64_be(&mut self, offset: Option<usize>) -> Result<u64> {
        self.big_uint64_be(offset)
    }

    /// Same as [`BufferReader::big_uint64_le`].
    pub fn uint64_le(&mut self, offset: Option<usize>) -> Result<u64> {
        self.big_uint64_le(offset)
    }

    /// Reads an IEEE-754 binary32 value in the reader's byte order.
    pub fn float(&mut self, offset: Option<usize>) -> Result<f32> {
        if self.big_endian {
            self.float_be(offset)
        } else {
            self.float_le(offset)
        }
    }

    /// Reads a big-endian IEEE-754 binary32 value.
    pub fn float_be(&mut self, offset: Option<usize>) -> Result<f32> {
        Ok(self.fixed::<F32<BE>>(offset)?.get())
    }

    /// Reads a little-endian IEEE-754 binary32 value.
    pub fn float_le(&mut self, offset: Option<usize>) -> Result<f32> {
        Ok(self.fixed::<F32<LE>>(offset)?.get())
    }

    /// Reads an IEEE-754 binary64 value in the reader's byte order.
    pub fn double(&mut self, offset: Option<usize>) -> Result<f64> {
        if self.big_endian {
            self.double_be(offset)
        } else {
            self.double_le(offset)
        }
    }

    /// Reads a big-endian IEEE-754 binary64 value.
    pub fn double_be(&mut self, offset: Option<usize>) -> Result<f64> {
        Ok(self.fixed::<F64<BE>>(offset)?.get())
    }

    /// Reads a little-endian IEEE-754 binary64 value.
    pub fn double_le(&mut self, offset: Option<usize>) -> Result<f64> {
        Ok(self.fixed::<F64<LE>>(offset)?.get())
    }

    fn unpacked(
        &mut self,
        offset: Option<usize>,
        little_endian: bool,
        (mantissa_bits, total_bytes): (u32, usize),
    ) -> Result<f64> {
        self.read_and_advance(total_bytes, offset, |data, at| {
            unpack_float(data, at, little_endian, mantissa_bits, total_bytes)
        })
    }

    /// Reads a 4-byte float with a 24-bit mantissa and a 7-bit exponent in the reader's byte
    /// order.
    pub fn float24_32(&mut self, offset: Option<usize>) -> Result<f64> {
        self.unpacked(offset, !self.big_endian, FLOAT24_32)
    }

    /// Reads a big-endian `Float24_32` value.
    pub fn float24_32_be(&mut self, offset: Option<usize>) -> Result<f64> {
        self.unpacked(offset, false, FLOAT24_32)
    }

    /// Reads a little-endian `Float24_32` value.
    pub fn float24_32_le(&mut self, offset: Option<usize>) -> Result<f64> {
        self.unpacked(offset, true, FLOAT24_32)
    }

    /// Reads a 2-byte float with a 12-bit mantissa and a 3-bit exponent in the reader's byte
    /// order.
    pub fn sfloat12_16(&mut self, offset: Option<usize>) -> Result<f64> {
        self.unpacked(offset, !self.big_endian, SFLOAT12_16)
    }

    /// Reads a big-endian `SFloat12_16` value.
    pub fn sfloat12_16_be(&mut self, offset: Option<usize>) -> Result<f64> {
        self.unpacked(offset, false, SFLOAT12_16)
    }

    /// Reads a little-endian `SFloat12_16` value.
    pub fn sfloat12_16_le(&mut self, offset: Option<usize>) -> Result<f64> {
        self.unpacked(offset, true, SFLOAT12_16)
    }

    /// Reads a float with an arbitrary layout.
    ///
    /// Reads `offset`, `mantissa_bits` and `total_bytes` (default binary32) from `options`. The
    /// byte order is little-endian if `options.little_endian` says so, and otherwise the reader's.
    pub fn ieee754(&mut self, options: &Options) -> Result<f64> {
        let little_endian = options.little_endian.unwrap_or(!self.big_endian);
        self.unpacked(options.offset, little_endian, options.layout())
    }

    /// Like [`BufferReader::ieee754`], always big-endian.
    pub fn ieee754_be(&mut self, options: &Options) -> Result<f64> {
        self.unpacked(options.offset, false, options.layout())
    }

    /// Like [`BufferReader::ieee754`], always little-endian.
    pub fn ieee754_le(&mut self, options: &Options) -> Result<f64> {
        self.unpacked(options.offset, true, options.layout())
    }

    /// Decodes a string of `options.length` bytes, or up to the end of the input when no length
    /// is given. The encoding defaults to UTF-8.
    ///
    /// A length of zero returns an empty string without looking at the offset or moving the
    /// cursor. Lengths running past the end of the input are clamped, and the cursor advances by
    /// the number of bytes that were actually decoded.
    pub fn as_string(&mut self, options: &Options) -> String {
        self.text(options, options.encoding.unwrap_or_default())
    }

    /// Like [`BufferReader::as_string`], always UTF-8.
    pub fn utf8(&mut self, options: &Options) -> String {
        self.text(options, Default::default())
    }

    fn text(&mut self, options: &Options, encoding: Encoding) -> String {
        if options.length == Some(0) {
            return String::new();
        }
        encoding.decode(self.span(options.offset, options.length))
    }

    /// Returns the raw bytes of a string without decoding them. Lengths are handled as in
    /// [`BufferReader::as_string`].
    #[cfg(feature = "bstr")]
    pub fn as_bstr(&mut self, options: &Options) -> &'a bstr::BStr {
        if options.length == Some(0) {
            return bstr::BStr::new(b"");
        }
        bstr::BStr::new(self.span(options.offset, options.length))
    }

    /// Returns `options.length` bytes. This function returns a slice reference to the bytes; it
    /// does not copy them.
    ///
    /// Without a length, or with a length of zero, nothing is read and the cursor does not move.
    /// Lengths running past the end of the input are clamped.
    pub fn bytes(&mut self, options: &Options) -> &'a [u8] {
        match options.length {
            None | Some(0) => &[],
            length => self.span(options.offset, length),
        }
    }

    /// Reads a 7-byte GATT date-time.
    ///
    /// The year is decoded big-endian if `options.big_endian` says so, and otherwise in the
    /// reader's byte order. Reads `offset` and `big_endian` from `options`.
    pub fn datetime(&mut self, options: &Options) -> Result<DateTime> {
        let big_endian = options.big_endian.unwrap_or(self.big_endian);
        self.read_and_advance(DATE_TIME_SIZE, options.offset, |data, at| {
            let bytes = load::<[u8; DATE_TIME_SIZE]>(data, at)?;
            DateTime::from_fields(DateTimeFields::from_bytes(bytes, big_endian))
        })
    }

    /// Reads a value of the kind called `name`, ignoring ASCII case.
    pub fn io(&mut self, name: &str, options: &Options) -> Result<Value> {
        self.io_kind(Kind::from_name(name)?, options)
    }

    /// Reads a value of the given kind. Fixed-width kinds only read `options.offset`.
    pub fn io_kind(&mut self, kind: Kind, options: &Options) -> Result<Value> {
        decoder(kind)(self, options)
    }
}

/// A type-erased reader accessor, as returned by [`decoder`].
pub type Decoder<'a> = for<'r> fn(&'r mut BufferReader<'a>, &Options) -> Result<Value>;

/// Returns the reader accessor for `kind`.
///
/// Aliases map to the same accessor, so `decoder(Kind::Int64)` and `decoder(Kind::BigInt64)`
/// behave identically.
pub fn decoder<'a>(kind: Kind) -> Decoder<'a> {
    match kind {
        Kind::AsString => |r, o| Ok(r.as_string(o).into()),
        Kind::Utf8 => |r, o| Ok(r.utf8(o).into()),
        Kind::Bytes => |r, o| Ok(r.bytes(o).into()),
        Kind::DateTime => |r, o| r.datetime(o).map(Value::from),
        Kind::Ieee754 => |r, o| r.ieee754(o).map(Value::from),
        Kind::Ieee754Be => |r, o| r.ieee754_be(o).map(Value::from),
        Kind::Ieee754Le => |r, o| r.ieee754_le(o).map(Value::from),
        Kind::Int8 => |r, o| r.int8(o.offset).map(Value::from),
        Kind::UInt8 => |r, o| r.uint8(o.offset).map(Value::from),
        Kind::Int16 => |r, o| r.int16(o.offset).map(Value::from),
        Kind::Int16Be => |r, o| r.int16_be(o.offset).map(Value::from),
        Kind::Int16Le => |r, o| r.int16_le(o.offset).map(Value::from),
        Kind::UInt16 => |r, o| r.uint16(o.offset).map(Value::from),
        Kind::UInt16Be => |r, o| r.uint16_be(o.offset).map(Value::from),
        Kind::UInt16Le => |r, o| r.uint16_le(o.offset).map(Value::from),
        Kind::Int32 => |r, o| r.int32(o.offset).map(Value::from),
        Kind::Int32Be => |r, o| r.int32_be(o.offset).map(Value::from),
        Kind::Int32Le => |r, o| r.int32_le(o.offset).map(Value::from),
        Kind::UInt32 => |r, o| r.uint32(o.offset).map(Value::from),
        Kind::UInt32Be => |r, o| r.uint32_be(o.offset).map(Value::from),
        Kind::UInt32Le => |r, o| r.uint32_le(o.offset).map(Value::from),
        Kind::Int => |r, o| r.int(o).map(Value::from),
        Kind::IntBe => |r, o| r.int_be(o).map(Value::from),
        Kind::IntLe => |r, o| r.int_le(o).map(Value::from),
        Kind::UInt => |r, o| r.uint(o).map(Value::from),
        Kind::UIntBe => |r, o| r.uint_be(o).map(Value::from),
        Kind::UIntLe => |r, o| r.uint_le(o).map(Value::from),
        Kind::BigInt64 | Kind::Int64 => |r, o| r.big_int64(o.offset).map(Value::from),
        Kind::BigInt64Be | Kind::Int64Be => |r, o| r.big_int64_be(o.offset).map(Value::from),
        Kind::BigInt64Le | Kind::Int64Le => |r, o| r.big_int64_le(o.offset).map(Value::from),
        Kind::BigUInt64 | Kind::UInt64 => |r, o| r.big_uint64(o.offset).map(Value::from),
        Kind::BigUInt64Be | Kind::UInt64Be => |r, o| r.big_uint64_be(o.offset).map(Value::from),
        Kind::BigUInt64Le | Kind::UInt64Le => |r, o| r.big_uint64_le(o.offset).map(Value::from),
        Kind::Float => |r, o| r.float(o.offset).map(Value::from),
        Kind::FloatBe => |r, o| r.float_be(o.offset).map(Value::from),
        Kind::FloatLe => |r, o| r.float_le(o.offset).map(Value::from),
        Kind::Double => |r, o| r.double(o.offset).map(Value::from),
        Kind::DoubleBe => |r, o| r.double_be(o.offset).map(Value::from),
        Kind::DoubleLe => |r, o| r.double_le(o.offset).map(Value::from),
        Kind::Float24_32 => |r, o| r.float24_32(o.offset).map(Value::from),
        Kind::Float24_32Be => |r, o| r.float24_32_be(o.offset).map(Value::from),
        Kind::Float24_32Le => |r, o| r.float24_32_le(o.offset).map(Value::from),
        Kind::SFloat12_16 => |r, o| r.sfloat12_16(o.offset).map(Value::from),
        Kind::SFloat12_16Be => |r, o| r.sfloat12_16_be(o.offset).map(Value::from),
        Kind::SFloat12_16Le => |r, o| r.sfloat12_16_le(o.offset).map(Value::from),
    }
}
