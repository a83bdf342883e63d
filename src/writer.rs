use core::mem::size_of;

use zerocopy::byteorder::{BE, F32, F64, I16, I32, I64, LE, U16, U32, U64};
use zerocopy::{Immutable, IntoBytes};

use crate::datetime::DATE_TIME_SIZE;
use crate::ieee754::{check_layout, pack_float, FLOAT24_32, SFLOAT12_16};
use crate::io::{field_mut, store, store_uint};
use crate::value::{check_range, narrow};
use crate::{BufferIo, Config, DateTime, Encoding, Error, Integer, Kind, Options, Result, Value};

/// Encodes values into a growable byte buffer through a cursor.
///
/// Every accessor writes at an explicit offset when one is given and leaves the cursor alone;
/// otherwise it writes at the cursor and moves it past the value. Accessors without a `_be` or
/// `_le` suffix use the byte order chosen at construction.
///
/// Writes past the end of the buffer grow it to exactly the required length, filling any gap
/// with zeros. The buffer never shrinks. Values are validated before the buffer is touched, so a
/// failed write leaves both the buffer and the cursor unchanged.
///
/// All accessors return `&mut Self` so that writes can be chained:
///
/// ```
/// use buffer_io::{BufferIo, BufferWriter, Config};
///
/// let mut w = BufferWriter::with_config(Config::default().with_size(0));
/// w.uint8(0x10, None)?.uint16_be(0x2030, None)?;
/// assert_eq!(w.trim(), [0x10, 0x20, 0x30]);
/// # Ok::<(), buffer_io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct BufferWriter {
    /// The output data.
    pub out: Vec<u8>,
    offset: usize,
    big_endian: bool,
}

impl Default for BufferWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferIo for BufferWriter {
    fn buffer(&self) -> &[u8] {
        &self.out
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

impl BufferWriter {
    /// Creates a little-endian writer over [`DEFAULT_SIZE`](crate::DEFAULT_SIZE) zero bytes.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a writer over `config.size` zero bytes.
    pub fn with_config(config: Config) -> Self {
        Self::wrap(vec![0; config.size], config)
    }

    /// Creates a writer over an existing buffer. `config.size` is ignored.
    pub fn wrap(out: Vec<u8>, config: Config) -> Self {
        Self {
            out,
            offset: config.offset,
            big_endian: config.big_endian,
        }
    }

    /// Extracts the inner buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.out
    }

    /// Grows the buffer so that the `size` bytes at `offset` are inside it.
    ///
    /// The new length is exactly `offset + size` and new bytes are zero. Nothing happens if the
    /// buffer is already long enough. Fails with [`Error::OutOfRange`] if `offset + size`
    /// overflows or the buffer cannot be allocated.
    pub fn ensure_capacity(&mut self, offset: usize, size: usize) -> Result<()> {
        let length = self.out.len();
        let out_of_range = Error::OutOfRange {
            offset,
            size,
            length,
        };
        let required = offset.checked_add(size).ok_or_else(|| out_of_range.clone())?;
        if required > length {
            log::trace!("growing buffer from {length} to {required} bytes");
            self.out
                .try_reserve_exact(required - length)
                .map_err(|_| out_of_range)?;
            self.out.resize(required, 0);
        }
        Ok(())
    }

    /// Runs `encode` at the explicit `offset` or, when there is none, at the cursor, after making
    /// room for `size` bytes there.
    ///
    /// `encode` receives the whole buffer and the position to write at, and returns the position
    /// just past what it wrote. Without an explicit offset the cursor moves to that position.
    pub fn write_and_advance(
        &mut self,
        size: usize,
        offset: Option<usize>,
        encode: impl FnOnce(&mut [u8], usize) -> Result<usize>,
    ) -> Result<&mut Self> {
        let at = offset.unwrap_or(self.offset);
        self.ensure_capacity(at, size)?;
        let end = encode(self.out.as_mut_slice(), at)?;
        if offset.is_none() {
            self.offset = end;
        }
        Ok(self)
    }

    #[inline(always)]
    fn put<T>(&mut self, value: T, offset: Option<usize>) -> Result<&mut Self>
    where
        T: IntoBytes + Immutable,
    {
        self.write_and_advance(size_of::<T>(), offset, |out, at| {
            store(out, at, value.as_bytes())
        })
    }

    /// Writes a single `i8` value.
    pub fn int8(&mut self, value: i8, offset: Option<usize>) -> Result<&mut Self> {
        self.put(value, offset)
    }

    /// Writes a single `u8` value.
    pub fn uint8(&mut self, value: u8, offset: Option<usize>) -> Result<&mut Self> {
        self.put(value, offset)
    }

    /// Writes an `i16` in the writer's byte order.
    pub fn int16(&mut self, value: i16, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.int16_be(value, offset)
        } else {
            self.int16_le(value, offset)
        }
    }

    /// Writes an `i16` in big-endian byte order.
    pub fn int16_be(&mut self, value: i16, offset: Option<usize>) -> Result<&mut Self> {
        self.put(I16::<BE>::new(value), offset)
    }

    /// Writes an `i16` in little-endian byte order.
    pub fn int16_le(&mut self, value: i16, offset: Option<usize>) -> Result<&mut Self> {
        self.put(I16::<LE>::new(value), offset)
    }

    /// Writes a `u16` in the writer's byte order.
    pub fn uint16(&mut self, value: u16, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.uint16_be(value, offset)
        } else {
            self.uint16_le(value, offset)
        }
    }

    /// Writes a `u16` in big-endian byte order.
    pub fn uint16_be(&mut self, value: u16, offset: Option<usize>) -> Result<&mut Self> {
        self.put(U16::<BE>::new(value), offset)
    }

    /// Writes a `u16` in little-endian byte order.
    pub fn uint16_le(&mut self, value: u16, offset: Option<usize>) -> Result<&mut Self> {
        self.put(U16::<LE>::new(value), offset)
    }

    /// Writes an `i32` in the writer's byte order.
    pub fn int32(&mut self, value: i32, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.int32_be(value, offset)
        } else {
            self.int32_le(value, offset)
        }
    }

    /// Writes an `i32` in big-endian byte order.
    pub fn int32_be(&mut self, value: i32, offset: Option<usize>) -> Result<&mut Self> {
        self.put(I32::<BE>::new(value), offset)
    }

    /// Writes an `i32` in little-endian byte order.
    pub fn int32_le(&mut self, value: i32, offset: Option<usize>) -> Result<&mut Self> {
        self.put(I32::<LE>::new(value), offset)
    }

    /// Writes a `u32` in the writer's byte order.
    pub fn uint32(&mut self, value: u32, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.uint32_be(value, offset)
        } else {
            self.uint32_le(value, offset)
        }
    }

    /// Writes a `u32` in big-endian byte order.
    pub fn uint32_be(&mut self, value: u32, offset: Option<usize>) -> Result<&mut Self> {
        self.put(U32::<BE>::new(value), offset)
    }

    /// Writes a `u32` in little-endian byte order.
    pub fn uint32_le(&mut self, value: u32, offset: Option<usize>) -> Result<&mut Self> {
        self.put(U32::<LE>::new(value), offset)
    }

    /// Writes a signed integer of `options.byte_length` bytes (1 to 6, default 6) in the writer's
    /// byte order.
    ///
    /// `value` is a native integer or a decimal string. Text that is not an integer fails with
    /// [`Error::InvalidNumber`]; a value that does not fit the field fails with
    /// [`Error::ValueOutOfRange`]. Reads `offset` and `byte_length` from `options`.
    pub fn int<'s>(
        &mut self,
        value: impl Into<Integer<'s>>,
        options: &Options,
    ) -> Result<&mut Self> {
        self.var_int(value.into(), options, true, !self.big_endian)
    }

    /// Writes a big-endian signed integer of `options.byte_length` bytes.
    pub fn int_be<'s>(
        &mut self,
        value: impl Into<Integer<'s>>,
        options: &Options,
    ) -> Result<&mut Self> {
        self.var_int(value.into(), options, true, false)
    }

    /// Writes a little-endian signed integer of `options.byte_length` bytes.
    pub fn int_le<'s>(
        &mut self,
        value: impl Into<Integer<'s>>,
        options: &Options,
    ) -> Result<&mut Self> {
        self.var_int(value.into(), options, true, true)
    }

    /// Writes an unsigned integer of `options.byte_length` bytes (1 to 6, default 6) in the
    /// writer's byte order. Negative values fail with [`Error::ValueOutOfRange`].
    ///
    /// See [`BufferWriter::int`] for the accepted values.
    pub fn uint<'s>(
        &mut self,
        value: impl Into<Integer<'s>>,
        options: &Options,
    ) -> Result<&mut Self> {
        self.var_int(value.into(), options, false, !self.big_endian)
    }

    /// Writes a big-endian unsigned integer of `options.byte_length` bytes.
    pub fn uint_be<'s>(
        &mut self,
        value: impl Into<Integer<'s>>,
        options: &Options,
    ) -> Result<&mut Self> {
        self.var_int(value.into(), options, false, false)
    }

    /// Writes a little-endian unsigned integer of `options.byte_length` bytes.
    pub fn uint_le<'s>(
        &mut self,
        value: impl Into<Integer<'s>>,
        options: &Options,
    ) -> Result<&mut Self> {
        self.var_int(value.into(), options, false, true)
    }

    fn var_int(
        &mut self,
        value: Integer<'_>,
        options: &Options,
        signed: bool,
        little_endian: bool,
    ) -> Result<&mut Self> {
        let size = options.byte_length()?;
        let value = check_range(value.normalize()?, size, signed)?;
        self.write_and_advance(size, options.offset, |out, at| {
            // two's complement; the field keeps the low `size` bytes
            store_uint(field_mut(out, at, size)?, value as u64, little_endian);
            Ok(at + size)
        })
    }

    /// Writes an `i64` in the writer's byte order.
    pub fn big_int64(&mut self, value: i64, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.big_int64_be(value, offset)
        } else {
            self.big_int64_le(value, offset)
        }
    }

    /// Writes an `i64` in big-endian byte order.
    pub fn big_int64_be(&mut self, value: i64, offset: Option<usize>) -> Result<&mut Self> {
        self.put(I64::<BE>::new(value), offset)
    }

    /// Writes an `i64` in little-endian byte order.
    pub fn big_int64_le(&mut self, value: i64, offset: Option<usize>) -> Result<&mut Self> {
        self.put(I64::<LE>::new(value), offset)
    }

    /// Writes a `u64` in the writer's byte order.
    pub fn big_uint64(&mut self, value: u64, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.big_uint64_be(value, offset)
        } else {
            self.big_uint64_le(value, offset)
        }
    }

    /// Writes a `u64` in big-endian byte order.
    pub fn big_uint64_be(&mut self, value: u64, offset: Option<usize>) -> Result<&mut Self> {
        self.put(U64::<BE>::new(value), offset)
    }

    /// Writes a `u64` in little-endian byte order.
    pub fn big_uint64_le(&mut self, value: u64, offset: Option<usize>) -> Result<&mut Self> {
        self.put(U64::<LE>::new(value), offset)
    }

    /// Same as [`BufferWriter::big_int64`].
    pub fn int64(&mut self, value: i64, offset: Option<usize>) -> Result<&mut Self> {
        self.big_int64(value, offset)
    }

    /// Same as [`BufferWriter::big_int64_be`].
    pub fn int64_be(&mut self, value: i64, offset: Option<usize>) -> Result<&mut Self> {
        self.big_int64_be(value, offset)
    }

    /// Same as [`BufferWriter::big_int64_le`].
    pub fn int64_le(&mut self, value: i64, offset: Option<usize>) -> Result<&mut Self> {
        self.big_int64_le(value, offset)
    }

    /// Same as [`BufferWriter::big_uint64`].
    pub fn uint64(&mut self, value: u64, offset: Option<usize>) -> Result<&mut Self> {
        self.big_uint64(value, offset)
    }

    /// Same as [`BufferWriter::big_uint64_be`].
    pub fn uint64_be(&mut self, value: u64, offset: Option<usize>) -> Result<&mut Self> {
        self.big_uint64_be(value, offset)
    }

    /// Same as [`BufferWriter::big_uint64_le`].
    pub fn uint64_le(&mut self, value: u64, offset: Option<usize>) -> Result<&mut Self> {
        self.big_uint64_le(value, offset)
    }

    /// Writes an IEEE-754 binary32 value in the writer's byte order.
    pub fn float(&mut self, value: f32, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.float_be(value, offset)
        } else {
            self.float_le(value, offset)
        }
    }

    /// Writes a big-endian IEEE-754 binary32 value.
    pub fn float_be(&mut self, value: f32, offset: Option<usize>) -> Result<&mut Self> {
        self.put(F32::<BE>::new(value), offset)
    }

    /// Writes a little-endian IEEE-754 binary32 value.
    pub fn float_le(&mut self, value: f32, offset: Option<usize>) -> Result<&mut Self> {
        self.put(F32::<LE>::new(value), offset)
    }

    /// Writes an IEEE-754 binary64 value in the writer's byte order.
    pub fn double(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        if self.big_endian {
            self.double_be(value, offset)
        } else {
            self.double_le(value, offset)
        }
    }

    /// Writes a big-endian IEEE-754 binary64 value.
    pub fn double_be(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.put(F64::<BE>::new(value), offset)
    }

    /// Writes a little-endian IEEE-754 binary64 value.
    pub fn double_le(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.put(F64::<LE>::new(value), offset)
    }

    fn packed(
        &mut self,
        value: f64,
        offset: Option<usize>,
        little_endian: bool,
        (mantissa_bits, total_bytes): (u32, usize),
    ) -> Result<&mut Self> {
        check_layout(mantissa_bits, total_bytes)?;
        self.write_and_advance(total_bytes, offset, |out, at| {
            pack_float(out, value, at, little_endian, mantissa_bits, total_bytes)
        })
    }

    /// Writes a 4-byte float with a 24-bit mantissa and a 7-bit exponent in the writer's byte
    /// order.
    pub fn float24_32(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.packed(value, offset, !self.big_endian, FLOAT24_32)
    }

    /// Writes a big-endian `Float24_32` value.
    pub fn float24_32_be(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.packed(value, offset, false, FLOAT24_32)
    }

    /// Writes a little-endian `Float24_32` value.
    pub fn float24_32_le(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.packed(value, offset, true, FLOAT24_32)
    }

    /// Writes a 2-byte float with a 12-bit mantissa and a 3-bit exponent in the writer's byte
    /// order.
    pub fn sfloat12_16(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.packed(value, offset, !self.big_endian, SFLOAT12_16)
    }

    /// Writes a big-endian `SFloat12_16` value.
    pub fn sfloat12_16_be(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.packed(value, offset, false, SFLOAT12_16)
    }

    /// Writes a little-endian `SFloat12_16` value.
    pub fn sfloat12_16_le(&mut self, value: f64, offset: Option<usize>) -> Result<&mut Self> {
        self.packed(value, offset, true, SFLOAT12_16)
    }

    /// Writes a float with an arbitrary layout.
    ///
    /// Reads `offset`, `mantissa_bits` and `total_bytes` (default binary32) from `options`. The
    /// byte order is little-endian if `options.little_endian` says so, and otherwise the writer's.
    /// An unusable layout fails with [`Error::InvalidFloatLayout`] before the buffer is grown.
    pub fn ieee754(&mut self, value: f64, options: &Options) -> Result<&mut Self> {
        let little_endian = options.little_endian.unwrap_or(!self.big_endian);
        self.packed(value, options.offset, little_endian, options.layout())
    }

    /// Like [`BufferWriter::ieee754`], always big-endian.
    pub fn ieee754_be(&mut self, value: f64, options: &Options) -> Result<&mut Self> {
        self.packed(value, options.offset, false, options.layout())
    }

    /// Like [`BufferWriter::ieee754`], always little-endian.
    pub fn ieee754_le(&mut self, value: f64, options: &Options) -> Result<&mut Self> {
        self.packed(value, options.offset, true, options.layout())
    }

    /// Encodes `value` and writes at most `options.length` bytes of it. The encoding defaults to
    /// UTF-8.
    ///
    /// Room is made for the full length, but only whole characters are written: when the length
    /// would cut a character in two, the write stops before it and the cursor ends up after the
    /// last complete character. A length of zero writes nothing.
    pub fn as_string(&mut self, value: &str, options: &Options) -> Result<&mut Self> {
        self.text(value, options, options.encoding.unwrap_or_default())
    }

    /// Like [`BufferWriter::as_string`], always UTF-8.
    pub fn utf8(&mut self, value: &str, options: &Options) -> Result<&mut Self> {
        self.text(value, options, Encoding::Utf8)
    }

    fn text(&mut self, value: &str, options: &Options, encoding: Encoding) -> Result<&mut Self> {
        if options.length == Some(0) {
            return Ok(self);
        }
        let encoded = encoding.encode(value)?;
        let length = options
            .length
            .map_or(encoded.len(), |n| n.min(encoded.len()));
        self.write_and_advance(length, options.offset, |out, at| {
            let complete = encoding.boundary(&encoded, length);
            store(out, at, &encoded[..complete])
        })
    }

    /// Writes the first `options.length` bytes of `value`, or all of it when no length is given.
    /// A length of zero writes nothing.
    pub fn bytes(&mut self, value: impl AsRef<[u8]>, options: &Options) -> Result<&mut Self> {
        if options.length == Some(0) {
            return Ok(self);
        }
        let bytes = value.as_ref();
        let count = options.length.map_or(bytes.len(), |n| n.min(bytes.len()));
        self.write_and_advance(count, options.offset, |out, at| {
            store(out, at, &bytes[..count])
        })
    }

    /// Writes a 7-byte GATT date-time. Timestamps are written as UTC.
    ///
    /// The year is encoded big-endian if `options.big_endian` says so, and otherwise in the
    /// writer's byte order. Fails with [`Error::DateOutOfRange`] for years outside `0..=65535`.
    pub fn datetime(&mut self, value: impl Into<DateTime>, options: &Options) -> Result<&mut Self> {
        let big_endian = options.big_endian.unwrap_or(self.big_endian);
        let bytes = value.into().fields()?.to_bytes(big_endian);
        self.write_and_advance(DATE_TIME_SIZE, options.offset, |out, at| {
            store(out, at, &bytes)
        })
    }

    /// Writes a value of the kind called `name`, ignoring ASCII case.
    pub fn io(&mut self, name: &str, value: Value, options: &Options) -> Result<&mut Self> {
        self.io_kind(Kind::from_name(name)?, value, options)
    }

    /// Writes a value of the given kind. Fixed-width kinds only read `options.offset`.
    ///
    /// Fails with [`Error::TypeMismatch`] when `value` has no sensible conversion to the kind.
    pub fn io_kind(&mut self, kind: Kind, value: Value, options: &Options) -> Result<&mut Self> {
        encoder(kind)(self, value, options)?;
        Ok(self)
    }
}

/// A type-erased writer accessor, as returned by [`encoder`].
pub type Encoder = for<'w> fn(&'w mut BufferWriter, Value, &Options) -> Result<()>;

/// Returns the writer accessor for `kind`.
///
/// Aliases map to the same accessor, so `encoder(Kind::UInt64)` and `encoder(Kind::BigUInt64)`
/// behave identically.
pub fn encoder(kind: Kind) -> Encoder {
    match kind {
        Kind::AsString => |w, v, o| w.as_string(&v.into_text(Kind::AsString)?, o).map(drop),
        Kind::Utf8 => |w, v, o| w.utf8(&v.into_text(Kind::Utf8)?, o).map(drop),
        Kind::Bytes => |w, v, o| w.bytes(v.into_bytes(Kind::Bytes)?, o).map(drop),
        Kind::DateTime => |w, v, o| w.datetime(v.into_datetime(Kind::DateTime)?, o).map(drop),
        Kind::Ieee754 => |w, v, o| w.ieee754(v.float(Kind::Ieee754)?, o).map(drop),
        Kind::Ieee754Be => |w, v, o| w.ieee754_be(v.float(Kind::Ieee754Be)?, o).map(drop),
        Kind::Ieee754Le => |w, v, o| w.ieee754_le(v.float(Kind::Ieee754Le)?, o).map(drop),
        Kind::Int8 => |w, v, o| w.int8(signed(&v, Kind::Int8)?, o.offset).map(drop),
        Kind::UInt8 => |w, v, o| w.uint8(unsigned(&v, Kind::UInt8)?, o.offset).map(drop),
        Kind::Int16 => |w, v, o| w.int16(signed(&v, Kind::Int16)?, o.offset).map(drop),
        Kind::Int16Be => |w, v, o| w.int16_be(signed(&v, Kind::Int16Be)?, o.offset).map(drop),
        Kind::Int16Le => |w, v, o| w.int16_le(signed(&v, Kind::Int16Le)?, o.offset).map(drop),
        Kind::UInt16 => |w, v, o| w.uint16(unsigned(&v, Kind::UInt16)?, o.offset).map(drop),
        Kind::UInt16Be => |w, v, o| w.uint16_be(unsigned(&v, Kind::UInt16Be)?, o.offset).map(drop),
        Kind::UInt16Le => |w, v, o| w.uint16_le(unsigned(&v, Kind::UInt16Le)?, o.offset).map(drop),
        Kind::Int32 => |w, v, o| w.int32(signed(&v, Kind::Int32)?, o.offset).map(drop),
        Kind::Int32Be => |w, v, o| w.int32_be(signed(&v, Kind::Int32Be)?, o.offset).map(drop),
        Kind::Int32Le => |w, v, o| w.int32_le(signed(&v, Kind::Int32Le)?, o.offset).map(drop),
        Kind::UInt32 => |w, v, o| w.uint32(unsigned(&v, Kind::UInt32)?, o.offset).map(drop),
        Kind::UInt32Be => |w, v, o| w.uint32_be(unsigned(&v, Kind::UInt32Be)?, o.offset).map(drop),
        Kind::UInt32Le => |w, v, o| w.uint32_le(unsigned(&v, Kind::UInt32Le)?, o.offset).map(drop),
        Kind::Int => |w, v, o| w.int(v.integer(Kind::Int)?, o).map(drop),
        Kind::IntBe => |w, v, o| w.int_be(v.integer(Kind::IntBe)?, o).map(drop),
        Kind::IntLe => |w, v, o| w.int_le(v.integer(Kind::IntLe)?, o).map(drop),
        Kind::UInt => |w, v, o| w.uint(v.integer(Kind::UInt)?, o).map(drop),
        Kind::UIntBe => |w, v, o| w.uint_be(v.integer(Kind::UIntBe)?, o).map(drop),
        Kind::UIntLe => |w, v, o| w.uint_le(v.integer(Kind::UIntLe)?, o).map(drop),
        Kind::BigInt64 | Kind::Int64 => {
            |w, v, o| w.big_int64(signed(&v, Kind::BigInt64)?, o.offset).map(drop)
        }
        Kind::BigInt64Be | Kind::Int64Be => {
            |w, v, o| w.big_int64_be(signed(&v, Kind::BigInt64Be)?, o.offset).map(drop)
        }
        Kind::BigInt64Le | Kind::Int64Le => {
            |w, v, o| w.big_int64_le(signed(&v, Kind::BigInt64Le)?, o.offset).map(drop)
        }
        Kind::BigUInt64 | Kind::UInt64 => {
            |w, v, o| w.big_uint64(unsigned(&v, Kind::BigUInt64)?, o.offset).map(drop)
        }
        Kind::BigUInt64Be | Kind::UInt64Be => {
            |w, v, o| w.big_uint64_be(unsigned(&v, Kind::BigUInt64Be)?, o.offset).map(drop)
        }
        Kind::BigUInt64Le | Kind::UInt64Le => {
            |w, v, o| w.big_uint64_le(unsigned(&v, Kind::BigUInt64Le)?, o.offset).map(drop)
        }
        Kind::Float => |w, v, o| w.float(v.float(Kind::Float)? as f32, o.offset).map(drop),
        Kind::FloatBe => |w, v, o| w.float_be(v.float(Kind::FloatBe)? as f32, o.offset).map(drop),
        Kind::FloatLe => |w, v, o| w.float_le(v.float(Kind::FloatLe)? as f32, o.offset).map(drop),
        Kind::Double => |w, v, o| w.double(v.float(Kind::Double)?, o.offset).map(drop),
        Kind::DoubleBe => |w, v, o| w.double_be(v.float(Kind::DoubleBe)?, o.offset).map(drop),
        Kind::DoubleLe => |w, v, o| w.double_le(v.float(Kind::DoubleLe)?, o.offset).map(drop),
        Kind::Float24_32 => {
            |w, v, o| w.float24_32(v.float(Kind::Float24_32)?, o.offset).map(drop)
        }
        Kind::Float24_32Be => {
            |w, v, o| w.float24_32_be(v.float(Kind::Float24_32Be)?, o.offset).map(drop)
        }
        Kind::Float24_32Le => {
            |w, v, o| w.float24_32_le(v.float(Kind::Float24_32Le)?, o.offset).map(drop)
        }
        Kind::SFloat12_16 => {
            |w, v, o| w.sfloat12_16(v.float(Kind::SFloat12_16)?, o.offset).map(drop)
        }
        Kind::SFloat12_16Be => {
            |w, v, o| w.sfloat12_16_be(v.float(Kind::SFloat12_16Be)?, o.offset).map(drop)
        }
        Kind::SFloat12_16Le => {
            |w, v, o| w.sfloat12_16_le(v.float(Kind::SFloat12_16Le)?, o.offset).map(drop)
        }
    }
}

fn signed<T: TryFrom<i128>>(value: &Value, kind: Kind) -> Result<T> {
    narrow(value.integer(kind)?, true)
}

fn unsigned<T: TryFrom<i128>>(value: &Value, kind: Kind) -> Result<T> {
    narrow(value.integer(kind)?, false)
}
