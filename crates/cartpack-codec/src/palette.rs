//! The fixed 16 color palette of the target console.

use crate::error::{EncodeError, EncodeResult};

/// Palette entries as RGB triplets, indexed by color number.
pub const PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0x1d, 0x2b, 0x53],
    [0x7e, 0x25, 0x53],
    [0x00, 0x87, 0x51],
    [0xab, 0x52, 0x36],
    [0x5f, 0x57, 0x4f],
    [0xc2, 0xc3, 0xc7],
    [0xff, 0xf1, 0xe8],
    [0xff, 0x00, 0x4d],
    [0xff, 0xa3, 0x00],
    [0xff, 0xec, 0x27],
    [0x00, 0xe4, 0x36],
    [0x29, 0xad, 0xff],
    [0x83, 0x76, 0x9c],
    [0xff, 0x77, 0xa8],
    [0xff, 0xcc, 0xaa],
];

/// Color used by faces that carry no material.
pub const DEFAULT_COLOR: u8 = 1;

/// Find the palette index of an exact RGB triplet.
pub fn palette_index(rgb: [u8; 3]) -> EncodeResult<u8> {
    PALETTE
        .iter()
        .position(|entry| *entry == rgb)
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| EncodeError::UnknownColor {
            hex: format!("{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]),
        })
}

/// Map a linear 0..1 diffuse color to its palette index.
///
/// Channels are scaled to 0..255 and rounded. There is no nearest-color
/// fallback: the result must match a palette entry exactly.
pub fn diffuse_to_color(diffuse: [f32; 3]) -> EncodeResult<u8> {
    let scaled = diffuse.map(|channel| (f64::from(channel) * 255.0).round_ties_even());
    if let Some(index) = scaled.iter().position(|channel| !(0.0..=255.0).contains(channel)) {
        return Err(EncodeError::ColorOutOfGamut {
            value: diffuse[index].to_string(),
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rgb = scaled.map(|channel| channel as u8);
    palette_index(rgb)
}
