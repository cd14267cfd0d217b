//! Fixed-width scalar packers.
//!
//! Every packer validates its input against the domain of the primitive and
//! fails instead of wrapping. Multi-byte values are big-endian.
//!
//! | Packer          | Domain                    | Bytes | Stored value             |
//! |-----------------|---------------------------|-------|--------------------------|
//! | [`pack_byte`]   | 0..=255                   | 1     | raw                      |
//! | [`pack_i16`]    | -32768..=32767            | 2     | two's complement         |
//! | [`pack_i32`]    | full `i32`                | 4     | two's complement         |
//! | [`pack_fixed`]  | 16.16 fixed point         | 4     | `trunc(x * 65536)`       |
//! | [`pack_short`]  | -128..=127                | 1     | `round(x + 128)`         |
//! | [`pack_float`]  | -4..=3.96875, step 1/32   | 1     | `round(32x + 128)`       |
//! | [`pack_double`] | -128..<128, step 1/128    | 2     | `round(128x + 16384)`    |
//!
//! Rounding is half-to-even so quantized values match the reference
//! exporter bit for bit.

use std::fmt::Display;

use crate::error::{EncodeError, EncodeResult};

/// Resolution of [`pack_float`].
pub const FLOAT_STEP: f32 = 1.0 / 32.0;
/// Resolution of [`pack_double`].
pub const DOUBLE_STEP: f32 = 1.0 / 128.0;

/// Append an unsigned byte.
pub fn pack_byte<T>(out: &mut Vec<u8>, value: T) -> EncodeResult<()>
where
    T: TryInto<u8> + Copy + Display,
{
    let byte = value
        .try_into()
        .map_err(|_| EncodeError::out_of_range("byte", value, "0..=255"))?;
    out.push(byte);
    Ok(())
}

/// Append a signed 16-bit integer.
pub fn pack_i16<T>(out: &mut Vec<u8>, value: T) -> EncodeResult<()>
where
    T: TryInto<i16> + Copy + Display,
{
    let word = value
        .try_into()
        .map_err(|_| EncodeError::out_of_range("int16", value, "-32768..=32767"))?;
    out.extend_from_slice(&word.to_be_bytes());
    Ok(())
}

/// Append a signed 32-bit integer.
pub fn pack_i32<T>(out: &mut Vec<u8>, value: T) -> EncodeResult<()>
where
    T: TryInto<i32> + Copy + Display,
{
    let dword = value
        .try_into()
        .map_err(|_| EncodeError::out_of_range("int32", value, "-2147483648..=2147483647"))?;
    out.extend_from_slice(&dword.to_be_bytes());
    Ok(())
}

/// Append a 16.16 fixed point number.
pub fn pack_fixed(out: &mut Vec<u8>, value: f32) -> EncodeResult<()> {
    let scaled = (f64::from(value) * 65536.0).trunc();
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&scaled) {
        return Err(EncodeError::out_of_range("fixed", value, "-32768..32768"));
    }
    #[allow(clippy::cast_possible_truncation)]
    let dword = scaled as i32;
    out.extend_from_slice(&dword.to_be_bytes());
    Ok(())
}

/// Append a value in -128..=127 as a single offset byte.
pub fn pack_short(out: &mut Vec<u8>, value: f32) -> EncodeResult<()> {
    let byte = quantize("short", "-128..=127", value, 1.0, 128.0, 0xff)?;
    out.push(byte.to_be_bytes()[1]);
    Ok(())
}

/// Append a value in -4..=3.96875 with 1/32 resolution.
pub fn pack_float(out: &mut Vec<u8>, value: f32) -> EncodeResult<()> {
    let byte = quantize(
        "float",
        "-4..=3.96875",
        value,
        1.0 / f64::from(FLOAT_STEP),
        128.0,
        0xff,
    )?;
    out.push(byte.to_be_bytes()[1]);
    Ok(())
}

/// Append a value in -128..=127.9921875 with 1/128 resolution.
///
/// The stored word never has its high bit set: the runtime reads it back
/// as a signed 16-bit number.
pub fn pack_double(out: &mut Vec<u8>, value: f32) -> EncodeResult<()> {
    let word = quantize(
        "double",
        "-128..=127.9921875",
        value,
        1.0 / f64::from(DOUBLE_STEP),
        16384.0,
        0x7fff,
    )?;
    out.extend_from_slice(&word.to_be_bytes());
    Ok(())
}

fn quantize(
    primitive: &'static str,
    domain: &'static str,
    value: f32,
    scale: f64,
    offset: f64,
    max: u16,
) -> EncodeResult<u16> {
    let scaled = (f64::from(value) * scale + offset).round_ties_even();
    if !(0.0..=f64::from(max)).contains(&scaled) {
        return Err(EncodeError::out_of_range(primitive, value, domain));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let word = scaled as u16;
    Ok(word)
}
