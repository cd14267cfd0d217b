//! Vector packing.

use glam::Vec3;

use crate::error::EncodeResult;
use crate::scalar::pack_double;

/// Append a vector as three quantized doubles.
///
/// The authoring tool is Z-up while the runtime is Y-up, so components are
/// written in `x, z, y` order.
pub fn pack_vector(out: &mut Vec<u8>, v: Vec3) -> EncodeResult<()> {
    pack_double(out, v.x)?;
    pack_double(out, v.z)?;
    pack_double(out, v.y)
}
