//! Convex collision hulls.
//!
//! A hull is stored as the list of its bounding planes. The runtime tests a
//! point against a hull with `dot(normal, point) <= distance` for every
//! plane.

use glam::Vec3;

use crate::error::{EncodeError, EncodeResult};
use crate::scalar::{pack_byte, pack_double};
use crate::varint::pack_variant;
use crate::vector::pack_vector;

/// A bounding plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Outward unit normal.
    pub normal: Vec3,
    /// Signed distance of the plane from the origin.
    pub distance: f32,
}

impl Plane {
    /// Plane with the given normal passing through `point`.
    #[must_use]
    pub fn through(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            distance: normal.dot(point),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    pub id: u8,
    pub planes: Vec<Plane>,
}

impl Hull {
    /// Whether `point` lies inside or on the hull.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.normal.dot(point) <= plane.distance)
    }
}

/// Append the hull block: count, then per hull `id, plane count` and
/// `normal, distance` per plane, in ascending id order.
pub fn encode_hulls(out: &mut Vec<u8>, hulls: &[Hull]) -> EncodeResult<()> {
    let mut sorted: Vec<&Hull> = hulls.iter().collect();
    sorted.sort_by_key(|hull| hull.id);
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0].id == pair[1].id) {
        return Err(EncodeError::DuplicateId {
            element: "hull",
            id: pair[0].id,
        });
    }

    pack_variant(out, sorted.len())?;
    for hull in sorted {
        pack_byte(out, hull.id)?;
        pack_variant(out, hull.planes.len())?;
        for plane in &hull.planes {
            pack_vector(out, plane.normal)?;
            pack_double(out, plane.distance)?;
        }
    }
    Ok(())
}
