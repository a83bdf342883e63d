use crate::*;

mod common;
mod datetime;
mod reader;

/// A writer over `len` zero bytes, little-endian, cursor at 0.
fn zeroed(len: usize) -> BufferWriter {
    BufferWriter::with_config(Config::default().with_size(len))
}

/// Same as [`zeroed`], big-endian.
fn zeroed_be(len: usize) -> BufferWriter {
    BufferWriter::with_config(Config::default().with_size(len).with_big_endian(true))
}

fn be() -> Config {
    Config::default().with_big_endian(true)
}
