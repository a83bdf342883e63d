//! The cursor and bounds engine shared by [`BufferReader`](crate::BufferReader) and
//! [`BufferWriter`](crate::BufferWriter).
//!
//! Both types own the same state: a byte buffer, a cursor `offset` and an endian flag. The
//! [`BufferIo`] trait gives them a common set of operations on that state. The `pub(crate)` field
//! primitives at the bottom of this module are the "native" load/store functions that every typed
//! accessor eventually calls; they are the only place where bounds are enforced on reads.

use core::mem::size_of;
use core::ops::Range;

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Length of the zero-filled buffer allocated by [`BufferWriter::new`](crate::BufferWriter::new).
pub const DEFAULT_SIZE: usize = 20;

/// Construction-time settings for a reader or writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Initial cursor position.
    pub offset: usize,
    /// Byte order used by accessors that do not carry a `_be` or `_le` suffix.
    pub big_endian: bool,
    /// Length of the buffer a writer allocates when it is not given one. Ignored by readers.
    pub size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offset: 0,
            big_endian: false,
            size: DEFAULT_SIZE,
        }
    }
}

impl Config {
    /// Sets the initial cursor position.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Selects big-endian (`true`) or little-endian (`false`) as the default byte order.
    pub fn with_big_endian(mut self, big_endian: bool) -> Self {
        self.big_endian = big_endian;
        self
    }

    /// Sets the length of the buffer allocated by a writer.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

/// Operations on the buffer, cursor and endian flag that readers and writers have in common.
///
/// Every typed accessor follows the same calling convention: when the caller passes an explicit
/// offset, the value is read or written there and the cursor does not move; otherwise the cursor
/// is used and then advanced past the value.
pub trait BufferIo {
    /// The whole underlying buffer.
    fn buffer(&self) -> &[u8];

    /// The current cursor position.
    fn offset(&self) -> usize;

    /// Moves the cursor. Any position is accepted, including positions past the end.
    fn set_offset(&mut self, offset: usize);

    /// `true` if suffix-less accessors use big-endian byte order.
    fn is_big_endian(&self) -> bool;

    /// The length of the underlying buffer.
    fn length(&self) -> usize {
        self.buffer().len()
    }

    /// Returns `true` if the cursor is at or past the end of the buffer.
    fn eob(&self) -> bool {
        self.offset() >= self.length()
    }

    /// Moves the cursor by `count` bytes, forward or backward. The cursor stops at 0.
    fn skip(&mut self, count: isize) {
        let offset = self.offset().saturating_add_signed(count);
        self.set_offset(offset);
    }

    /// Moves the cursor to `offset`.
    fn skip_to(&mut self, offset: usize) {
        self.set_offset(offset);
    }

    /// Returns `true` if the `size` bytes starting at `offset` are not all inside the buffer.
    ///
    /// This only tests; it never fails and never grows the buffer.
    fn is_range_error(&self, size: usize, offset: usize) -> bool {
        match offset.checked_add(size) {
            Some(end) => end > self.length(),
            None => true,
        }
    }

    /// Returns the bytes from `cursor + start` to `cursor + end`, clamped to the buffer.
    ///
    /// When `end` is `None` (or `Some(0)`), the slice extends to the end of the buffer. The result
    /// borrows the buffer; it is not a copy.
    fn slice(&self, start: usize, end: Option<usize>) -> &[u8] {
        let buffer = self.buffer();
        let from = self.offset().saturating_add(start).min(buffer.len());
        let to = match end {
            Some(end) if end != 0 => self.offset().saturating_add(end).min(buffer.len()),
            _ => buffer.len(),
        };
        buffer.get(from..to.max(from)).unwrap_or_default()
    }

    /// Returns the bytes from the start of the buffer up to the cursor.
    ///
    /// For a writer this is "everything written so far" when writing sequentially.
    fn trim(&self) -> &[u8] {
        let buffer = self.buffer();
        buffer.get(..self.offset().min(buffer.len())).unwrap_or_default()
    }
}

/// Validates that `size` bytes at `at` fit in a buffer of `length` bytes.
pub(crate) fn checked_range(length: usize, at: usize, size: usize) -> Result<Range<usize>> {
    match at.checked_add(size) {
        Some(end) if end <= length => Ok(at..end),
        _ => Err(Error::OutOfRange {
            offset: at,
            size,
            length,
        }),
    }
}

/// Borrows `size` bytes at `at`.
pub(crate) fn field(buffer: &[u8], at: usize, size: usize) -> Result<&[u8]> {
    let range = checked_range(buffer.len(), at, size)?;
    Ok(&buffer[range])
}

/// Mutably borrows `size` bytes at `at`.
pub(crate) fn field_mut(buffer: &mut [u8], at: usize, size: usize) -> Result<&mut [u8]> {
    let range = checked_range(buffer.len(), at, size)?;
    Ok(&mut buffer[range])
}

/// Decodes a fixed-size value (usually a zerocopy byte-order type) stored at `at`.
pub(crate) fn load<T: FromBytes>(buffer: &[u8], at: usize) -> Result<T> {
    let bytes = field(buffer, at, size_of::<T>())?;
    T::read_from_bytes(bytes).map_err(|_| Error::OutOfRange {
        offset: at,
        size: size_of::<T>(),
        length: buffer.len(),
    })
}

/// Copies `bytes` into the buffer at `at` and returns the offset just past them.
pub(crate) fn store(buffer: &mut [u8], at: usize, bytes: &[u8]) -> Result<usize> {
    field_mut(buffer, at, bytes.len())?.copy_from_slice(bytes);
    Ok(at + bytes.len())
}

/// Assembles up to 8 bytes into an unsigned integer.
pub(crate) fn load_uint(bytes: &[u8], little_endian: bool) -> u64 {
    let push = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);
    if little_endian {
        bytes.iter().rev().fold(0, push)
    } else {
        bytes.iter().fold(0, push)
    }
}

/// Spreads the low `bytes.len()` bytes of `value` over `bytes`. Higher bytes are dropped.
pub(crate) fn store_uint(bytes: &mut [u8], mut value: u64, little_endian: bool) {
    let mut put = |b: &mut u8| {
        *b = value as u8;
        value >>= 8;
    };
    if little_endian {
        bytes.iter_mut().for_each(&mut put);
    } else {
        bytes.iter_mut().rev().for_each(&mut put);
    }
}
