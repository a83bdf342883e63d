//! Reads and writes little- and big-endian binary buffers through a cursor.
//!
//! [`BufferReader`] decodes values from a borrowed slice and [`BufferWriter`] encodes them into a
//! growable `Vec<u8>`. Both keep a cursor that advances past each value, unless the caller gives
//! an explicit offset, in which case the cursor is left alone. The two types share their cursor
//! operations through the [`BufferIo`] trait.
//!
//! Besides the usual fixed-width integers and floats, the crate handles variable-width integers
//! of 1 to 6 bytes, floats with arbitrary IEEE-754 layouts (see [`ieee754`]), strings in several
//! encodings and the 7-byte Bluetooth GATT `date_time` characteristic.
//!
//! Every kind of value has a name (see [`Kind`]), and both sides can be driven by name through
//! `io`:
//!
//! ```
//! use buffer_io::{BufferReader, BufferWriter, Options, Value};
//!
//! let mut w = BufferWriter::new();
//! w.io("UInt16BE", Value::UInt(0x1234), &Options::new())?;
//! w.io("uint8", Value::UInt(7), &Options::new())?;
//!
//! let mut r = BufferReader::new(&w.out);
//! assert_eq!(r.io("uint16be", &Options::new())?, Value::UInt(0x1234));
//! assert_eq!(r.uint8(None)?, 7);
//! # Ok::<(), buffer_io::Error>(())
//! ```
//!
//! # References
//! * <https://www.bluetooth.com/specifications/gss/> (`date_time`, UUID 0x2A08)

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod datetime;
mod encoding;
mod error;
pub mod ieee754;
mod io;
mod kind;
mod options;
mod reader;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use datetime::{DateTime, DateTimeFields, DATE_TIME_SIZE};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use io::{BufferIo, Config, DEFAULT_SIZE};
pub use kind::{types, Kind};
pub use options::{Options, DEFAULT_BYTE_LENGTH};
pub use reader::{decoder, BufferReader, Decoder};
pub use value::{Integer, Value};
pub use writer::{encoder, BufferWriter, Encoder};
