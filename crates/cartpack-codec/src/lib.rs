//! Encode 3D scenes into the packed byte format of a fantasy console.
//!
//! The target runtime copies the whole archive into a 32 KiB extended
//! memory region and walks it byte by byte, so the format is dense and
//! every field has a fixed domain. This crate only produces the format:
//! pure synchronous functions over plain data, no I/O and no logging. The
//! caller decides how scenes are obtained and how entries are scheduled.
//!
//! # Design principles
//!
//! - **Fail fast**: every primitive rejects values outside its domain,
//!   nothing wraps or clamps
//! - **Tagged records**: optional face fields are driven by flags derived
//!   from the record itself
//! - **Single source of truth**: palette and budget are named constants
//!
//! # Key functions
//!
//! - [`pack_variant`]: 1 or 2 byte unsigned integers up to 32767
//! - [`pack_double`]: 1/128 resolution scalars, used by [`pack_vector`]
//! - [`encode_face`]: face record with optional frame, solid and decals
//! - [`encode_scene`]: anchors, hulls and LOD layers of one model
//! - [`encode_archive`]: named entries, checked with [`check_budget`]

mod error;
mod varint;

pub mod anchor;
pub mod archive;
pub mod face;
pub mod hull;
pub mod model;
pub mod palette;
pub mod scalar;
pub mod vector;

pub use anchor::{Anchor, encode_anchors};
pub use archive::{ArchiveEntry, MAX_ARCHIVE_SIZE, check_budget, encode_archive, pack_name};
pub use error::{EncodeError, EncodeResult, ErrorKind};
pub use face::{Face, Polygon, Ring, Style, encode_face};
pub use hull::{Hull, Plane, encode_hulls};
pub use model::{DEFAULT_LOD_DISTANCE, Layer, Model, Scene, encode_layer, encode_model, encode_scene};
pub use palette::{DEFAULT_COLOR, PALETTE, diffuse_to_color, palette_index};
pub use scalar::{pack_byte, pack_double, pack_fixed, pack_float, pack_i16, pack_i32, pack_short};
pub use varint::{MAX_VARIANT, pack_variant};
pub use vector::pack_vector;

#[cfg(any(test, feature = "test-tools"))]
pub mod testing;
