//! Variable-length unsigned integers.
//!
//! Values up to 127 take a single byte with the high bit clear. Values up
//! to 32767 take two big-endian bytes with the high bit of the first one
//! set. Anything larger cannot be represented.

use std::fmt::Display;

use crate::error::{EncodeError, EncodeResult};

/// Largest value a variant can hold.
pub const MAX_VARIANT: u16 = 0x7fff;

/// Append `value` as a 1 or 2 byte variant.
pub fn pack_variant<T>(out: &mut Vec<u8>, value: T) -> EncodeResult<()>
where
    T: TryInto<u16> + Copy + Display,
{
    let word = value
        .try_into()
        .ok()
        .filter(|word| *word <= MAX_VARIANT)
        .ok_or_else(|| EncodeError::out_of_range("variant", value, "0..=32767"))?;

    match u8::try_from(word) {
        Ok(byte) if byte <= 0x7f => out.push(byte),
        _ => out.extend_from_slice(&(word | 0x8000).to_be_bytes()),
    }
    Ok(())
}
