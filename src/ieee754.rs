//! Packing and unpacking of IEEE-754 style floating point numbers with arbitrary layouts.
//!
//! A layout is described by the number of mantissa bits and the total number of bytes. The
//! remaining bits hold the sign (1 bit) and the biased exponent. `(23, 4)` is binary32 and
//! `(52, 8)` is binary64; both are handled through the native bit patterns. Other layouts, such as
//! the compact `(12, 2)` and `(24, 4)` formats used by some sensors, go through the generic path,
//! which truncates the mantissa towards zero and supports subnormals, infinities and NaN. NaN is
//! written with a mantissa of 1.

use crate::io::{field, field_mut, load_uint, store_uint};
use crate::{Error, Result};

/// Mantissa width and size of IEEE-754 binary32.
pub const SINGLE: (u32, usize) = (23, 4);

/// Mantissa width and size of IEEE-754 binary64.
pub const DOUBLE: (u32, usize) = (52, 8);

/// Mantissa width and size of the 32-bit `Float24_32` format.
pub const FLOAT24_32: (u32, usize) = (24, 4);

/// Mantissa width and size of the 16-bit `SFloat12_16` format.
pub const SFLOAT12_16: (u32, usize) = (12, 2);

#[derive(Clone, Copy)]
struct Layout {
    mantissa_bits: u32,
    exponent_bits: u32,
    total_bytes: usize,
}

impl Layout {
    fn new(mantissa_bits: u32, total_bytes: usize) -> Result<Self> {
        let invalid = Error::InvalidFloatLayout {
            mantissa_bits,
            total_bytes,
        };
        if !(1..=8).contains(&total_bytes) || !(1..64).contains(&mantissa_bits) {
            return Err(invalid);
        }
        let total_bits = total_bytes as u32 * 8;
        match total_bits.checked_sub(mantissa_bits + 1) {
            // wider exponents than binary64 cannot be evaluated through f64
            Some(exponent_bits) if (1..=11).contains(&exponent_bits) => Ok(Self {
                mantissa_bits,
                exponent_bits,
                total_bytes,
            }),
            _ => Err(invalid),
        }
    }

    fn exponent_max(self) -> u64 {
        (1 << self.exponent_bits) - 1
    }

    fn bias(self) -> i32 {
        (self.exponent_max() >> 1) as i32
    }

    fn implicit_bit(self) -> u64 {
        1 << self.mantissa_bits
    }

    fn assemble(self, negative: bool, exponent: u64, mantissa: u64) -> u64 {
        let sign = u64::from(negative) << (self.exponent_bits + self.mantissa_bits);
        sign | (exponent << self.mantissa_bits) | mantissa
    }
}

/// Fails with [`Error::InvalidFloatLayout`] unless `mantissa_bits` and `total_bytes` describe a
/// layout that [`pack_float`] and [`unpack_float`] accept.
pub fn check_layout(mantissa_bits: u32, total_bytes: usize) -> Result<()> {
    Layout::new(mantissa_bits, total_bytes).map(|_| ())
}

/// Multiplies `x` by `2^exp` without overflowing intermediate powers of two.
fn ldexp(mut x: f64, mut exp: i32) -> f64 {
    let two_pow_1023 = f64::from_bits(0x7FE0_0000_0000_0000);
    let two_pow_minus_1022 = f64::from_bits(0x0010_0000_0000_0000);

    while exp > 1023 {
        x *= two_pow_1023;
        exp -= 1023;
    }
    while exp < -1022 {
        x *= two_pow_minus_1022;
        exp += 1022;
    }
    x * f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Reads a float of the given layout from `buffer` at `offset`.
///
/// Fails with [`Error::OutOfRange`] if `offset + total_bytes` exceeds the buffer, and with
/// [`Error::InvalidFloatLayout`] if the layout leaves no room for an exponent.
pub fn unpack_float(
    buffer: &[u8],
    offset: usize,
    little_endian: bool,
    mantissa_bits: u32,
    total_bytes: usize,
) -> Result<f64> {
    let layout = Layout::new(mantissa_bits, total_bytes)?;
    let raw = load_uint(field(buffer, offset, total_bytes)?, little_endian);

    match (mantissa_bits, total_bytes) {
        SINGLE => return Ok(f64::from(f32::from_bits(raw as u32))),
        DOUBLE => return Ok(f64::from_bits(raw)),
        _ => {}
    }

    let negative = (raw >> (layout.exponent_bits + layout.mantissa_bits)) & 1 == 1;
    let exponent = (raw >> layout.mantissa_bits) & layout.exponent_max();
    let mantissa = raw & (layout.implicit_bit() - 1);
    let scale = layout.mantissa_bits as i32;

    let magnitude = if exponent == 0 {
        ldexp(mantissa as f64, 1 - layout.bias() - scale)
    } else if exponent == layout.exponent_max() {
        if mantissa != 0 {
            return Ok(f64::NAN);
        }
        f64::INFINITY
    } else {
        let significand = (mantissa | layout.implicit_bit()) as f64;
        ldexp(significand, exponent as i32 - layout.bias() - scale)
    };

    Ok(if negative { -magnitude } else { magnitude })
}

/// Writes `value` into `buffer` at `offset` using the given layout and returns the offset just
/// past the written bytes.
///
/// Values too large for the layout become infinities; values too small become zero or subnormal.
/// Outside binary32 and binary64, mantissa bits that do not fit are truncated rather than rounded,
/// so `2.45` in the `(12, 2)` layout is `0x4399`.
/// The buffer is not grown; fails with [`Error::OutOfRange`] if the bytes do not fit.
pub fn pack_float(
    buffer: &mut [u8],
    value: f64,
    offset: usize,
    little_endian: bool,
    mantissa_bits: u32,
    total_bytes: usize,
) -> Result<usize> {
    let layout = Layout::new(mantissa_bits, total_bytes)?;
    let target = field_mut(buffer, offset, total_bytes)?;

    let raw = match (mantissa_bits, total_bytes) {
        SINGLE => u64::from((value as f32).to_bits()),
        DOUBLE => value.to_bits(),
        _ => encode_bits(layout, value),
    };
    store_uint(target, raw, little_endian);
    Ok(offset + layout.total_bytes)
}

fn encode_bits(layout: Layout, value: f64) -> u64 {
    let negative = value.is_sign_negative() && !value.is_nan();
    let magnitude = value.abs();
    let exponent_max = layout.exponent_max();
    let implicit = layout.implicit_bit();
    let scale = layout.mantissa_bits as i32;
    let bias = layout.bias();

    if magnitude.is_nan() {
        return layout.assemble(false, exponent_max, 1);
    }
    if magnitude.is_infinite() {
        return layout.assemble(negative, exponent_max, 0);
    }
    if magnitude == 0.0 {
        return layout.assemble(negative, 0, 0);
    }

    let mut exponent = magnitude.log2().floor() as i32;
    // log2 may be off by one right at powers of two.
    if ldexp(1.0, exponent) > magnitude {
        exponent -= 1;
    } else if ldexp(1.0, exponent + 1) <= magnitude {
        exponent += 1;
    }

    let biased = exponent + bias;
    if biased >= exponent_max as i32 {
        return layout.assemble(negative, exponent_max, 0);
    }
    // mantissa bits past the field are dropped, not rounded
    if biased < 1 {
        let mantissa = ldexp(magnitude, bias - 1 + scale).floor() as u64;
        return layout.assemble(negative, 0, mantissa);
    }
    let significand = ldexp(magnitude, scale - exponent).floor() as u64;
    layout.assemble(negative, biased as u64, significand - implicit)
}
