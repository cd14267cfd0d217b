//! Face records.
//!
//! A face is a tagged record: its flags byte announces which optional fields
//! follow, and the flags are always derived from the record itself so the
//! two can never disagree.
//!
//! # Format
//!
//! ```text
//! flags      u8
//! color      u8        palette index 0..=15
//! frame      u8        if FLAG_FRAME
//! solid      u8        if FLAG_SOLID, collider id 1..=8
//! ring       variant×3 (variant×4 if FLAG_QUAD), 1-based vertex indices
//! decals     variant count + decal records, if FLAG_DECALS
//! normal     vector
//! ```
//!
//! Decal records carry the same fields up to and including the ring. They
//! never nest further decals and have no normal.

use glam::Vec3;

use crate::error::{EncodeError, EncodeResult};
use crate::scalar::pack_byte;
use crate::varint::{MAX_VARIANT, pack_variant};
use crate::vector::pack_vector;

/// An animation frame id follows the color byte.
pub const FLAG_FRAME: u8 = 0x01;
/// A block of decal records follows the ring.
pub const FLAG_DECALS: u8 = 0x02;
/// A collider id follows the color (and frame) byte.
pub const FLAG_SOLID: u8 = 0x04;
/// Face is drawn from both sides.
pub const FLAG_DUAL_SIDED: u8 = 0x10;
/// Ring has four vertices instead of three.
pub const FLAG_QUAD: u8 = 0x20;
/// Face edges are drawn.
pub const FLAG_EDGES: u8 = 0x40;

/// Highest collider id a face can carry.
pub const MAX_SOLID_ID: u8 = 8;
/// Highest palette index.
pub const MAX_COLOR: u8 = 15;

/// Ordered vertex ring of a face, as 0-based vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Triangle([u16; 3]),
    Quad([u16; 4]),
}

impl Ring {
    /// Build a ring from a polygon loop, rejecting anything but tris and quads.
    pub fn from_indices(indices: &[usize]) -> EncodeResult<Self> {
        let narrow = |index: usize| {
            u16::try_from(index)
                .ok()
                .filter(|index| *index < MAX_VARIANT)
                .ok_or_else(|| EncodeError::out_of_range("vertex index", index, "0..=32766"))
        };
        match *indices {
            [a, b, c] => Ok(Self::Triangle([narrow(a)?, narrow(b)?, narrow(c)?])),
            [a, b, c, d] => Ok(Self::Quad([narrow(a)?, narrow(b)?, narrow(c)?, narrow(d)?])),
            _ => Err(EncodeError::FaceArity {
                count: indices.len(),
            }),
        }
    }

    /// Vertex indices in ring order.
    #[must_use]
    pub fn indices(&self) -> &[u16] {
        match self {
            Self::Triangle(indices) => indices.as_slice(),
            Self::Quad(indices) => indices.as_slice(),
        }
    }

    #[must_use]
    pub fn is_quad(&self) -> bool {
        matches!(self, Self::Quad(_))
    }
}

/// Material-derived appearance of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Palette index.
    pub color: u8,
    /// Back-face culling disabled.
    pub dual_sided: bool,
    /// Edges drawn on top of the fill.
    pub edges: bool,
}

/// Fields shared by top-level faces and decals.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub style: Style,
    /// Animation frame the polygon belongs to.
    pub frame: Option<u8>,
    /// Collider id.
    pub solid: Option<u8>,
    pub ring: Ring,
}

impl Polygon {
    /// Flags announced by this polygon, excluding [`FLAG_DECALS`].
    #[must_use]
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.frame.is_some() {
            flags |= FLAG_FRAME;
        }
        if self.solid.is_some() {
            flags |= FLAG_SOLID;
        }
        if self.style.dual_sided {
            flags |= FLAG_DUAL_SIDED;
        }
        if self.ring.is_quad() {
            flags |= FLAG_QUAD;
        }
        if self.style.edges {
            flags |= FLAG_EDGES;
        }
        flags
    }
}

/// A top-level face with its nested decals.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub polygon: Polygon,
    pub decals: Vec<Polygon>,
    pub normal: Vec3,
}

impl Face {
    #[must_use]
    pub fn flags(&self) -> u8 {
        let mut flags = self.polygon.flags();
        if !self.decals.is_empty() {
            flags |= FLAG_DECALS;
        }
        flags
    }
}

/// Append a face record.
///
/// `vertex_count` is the number of vertices of the owning model; every ring
/// index must refer to one of them.
pub fn encode_face(out: &mut Vec<u8>, face: &Face, vertex_count: usize) -> EncodeResult<()> {
    encode_polygon(out, &face.polygon, face.flags(), vertex_count)?;
    if !face.decals.is_empty() {
        pack_variant(out, face.decals.len())?;
        for decal in &face.decals {
            encode_polygon(out, decal, decal.flags(), vertex_count)?;
        }
    }
    pack_vector(out, face.normal)
}

fn encode_polygon(
    out: &mut Vec<u8>,
    polygon: &Polygon,
    flags: u8,
    vertex_count: usize,
) -> EncodeResult<()> {
    if polygon.style.color > MAX_COLOR {
        return Err(EncodeError::out_of_range("color", polygon.style.color, "0..=15"));
    }
    out.push(flags);
    out.push(polygon.style.color);
    if let Some(frame) = polygon.frame {
        pack_byte(out, frame)?;
    }
    if let Some(solid) = polygon.solid {
        if !(1..=MAX_SOLID_ID).contains(&solid) {
            return Err(EncodeError::out_of_range("solid id", solid, "1..=8"));
        }
        pack_byte(out, solid)?;
    }
    for &index in polygon.ring.indices() {
        if usize::from(index) >= vertex_count {
            return Err(EncodeError::VertexIndex {
                index: usize::from(index),
                vertex_count,
            });
        }
        pack_variant(out, usize::from(index) + 1)?;
    }
    Ok(())
}
