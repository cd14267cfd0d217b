//! Anchor block.
//!
//! Anchors are named attachment points (guns, exhausts, cameras) with a
//! position and a forward direction.

use glam::Vec3;

use crate::error::{EncodeError, EncodeResult};
use crate::scalar::pack_byte;
use crate::varint::pack_variant;
use crate::vector::pack_vector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub id: u8,
    pub position: Vec3,
    /// Unit forward direction.
    pub forward: Vec3,
}

/// Append the anchor block: count, then `id, position, forward` per anchor
/// in ascending id order.
pub fn encode_anchors(out: &mut Vec<u8>, anchors: &[Anchor]) -> EncodeResult<()> {
    let mut sorted: Vec<&Anchor> = anchors.iter().collect();
    sorted.sort_by_key(|anchor| anchor.id);
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0].id == pair[1].id) {
        return Err(EncodeError::DuplicateId {
            element: "anchor",
            id: pair[0].id,
        });
    }

    pack_variant(out, sorted.len())?;
    for anchor in sorted {
        pack_byte(out, anchor.id)?;
        pack_vector(out, anchor.position)?;
        pack_vector(out, anchor.forward)?;
    }
    Ok(())
}
