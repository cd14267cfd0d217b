//! Error types for encoding.

use std::fmt::Display;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Broad classification of an [`EncodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value does not fit the domain of its primitive.
    Range,
    /// Face shape or group membership breaks a structural rule.
    Topology,
    /// A material color has no exact palette entry.
    PaletteLookup,
    /// The final archive is larger than the target memory region.
    BudgetExceeded,
    /// An external stage failed or handed over malformed data.
    Collaborator,
}

/// Errors that can occur while encoding a scene or archive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Value outside the domain of a fixed-width primitive.
    #[error("cannot encode {value} as {primitive}: outside {domain}")]
    OutOfRange {
        primitive: &'static str,
        value: String,
        domain: &'static str,
    },

    /// Archive entry name that the target cannot represent.
    #[error("archive entry name {name:?} must be ASCII")]
    NonAsciiName { name: String },

    /// Face ring that is neither a triangle nor a quad.
    #[error("face has {count} vertices, only triangles and quads are supported")]
    FaceArity { count: usize },

    /// Face ring referencing a vertex the model does not have.
    #[error("face references vertex {index} but the model has {vertex_count} vertices")]
    VertexIndex { index: usize, vertex_count: usize },

    /// Face fully contained in more than one group.
    #[error("face is fully contained in groups {first:?} and {second:?}, at most one is allowed")]
    AmbiguousGroup { first: String, second: String },

    /// Face tagged with more than one collider id.
    #[error("face belongs to solid groups {first} and {second}, at most one is allowed")]
    MultipleSolids { first: u8, second: u8 },

    /// Decal group whose parent group matches no face.
    #[error("decal group {group:?} has no parent face in group {parent:?}")]
    OrphanDecal { group: String, parent: String },

    /// Decal group whose parent group matches several faces.
    #[error("decal group {group:?} matches {count} parent faces in group {parent:?}, expected one")]
    AmbiguousDecalParent {
        group: String,
        parent: String,
        count: usize,
    },

    /// Two anchors or two hulls share the same id.
    #[error("duplicate {element} id {id}")]
    DuplicateId { element: &'static str, id: u8 },

    /// Material color channel outside the linear 0..1 range.
    #[error("diffuse channel {value} is outside 0..=1")]
    ColorOutOfGamut { value: String },

    /// Material color with no exact palette match.
    #[error("unknown color: 0x{hex}")]
    UnknownColor { hex: String },

    /// Final archive larger than the extended memory region.
    #[error("game data too large ({size} bytes), exceeds max. {limit} bytes")]
    BudgetExceeded { size: usize, limit: usize },
}

impl EncodeError {
    /// Range error for `value` given as `primitive` outside `domain`.
    #[must_use]
    pub fn out_of_range(
        primitive: &'static str,
        value: impl Display,
        domain: &'static str,
    ) -> Self {
        Self::OutOfRange {
            primitive,
            value: value.to_string(),
            domain,
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } | Self::NonAsciiName { .. } => ErrorKind::Range,
            Self::FaceArity { .. }
            | Self::VertexIndex { .. }
            | Self::AmbiguousGroup { .. }
            | Self::MultipleSolids { .. }
            | Self::OrphanDecal { .. }
            | Self::AmbiguousDecalParent { .. }
            | Self::DuplicateId { .. } => ErrorKind::Topology,
            Self::ColorOutOfGamut { .. } | Self::UnknownColor { .. } => ErrorKind::PaletteLookup,
            Self::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
        }
    }
}
