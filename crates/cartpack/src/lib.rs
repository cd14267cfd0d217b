//! Build size-budgeted scene archives for a memory-constrained fantasy
//! console.
//!
//! Takes the normalized scene view produced by the extraction stage, turns
//! it into codec records (faces with collider, frame and decal tags,
//! anchors, hulls, LOD layers) and packs all models into one archive that
//! must fit the console's 32767 byte extended memory region.
//!
//! # Key functions
//!
//! - [`build_archive`]: the whole pipeline for a [`BuildConfig`]
//! - [`export_scene`]: assemble and encode a single model
//! - [`assemble_model`]: face assembly for one LOD mesh
//! - [`compress_smallest`]: compression parameter search

mod error;
mod pipeline;

pub mod auxiliary;
pub mod compress;
pub mod config;
pub mod extract;
pub mod faces;
pub mod naming;
pub mod scene;
pub mod source;

pub use auxiliary::{collect_anchors, collect_hulls};
pub use compress::{Compressed, CompressionParams, Compressor, compress, compress_smallest};
pub use config::BuildConfig;
pub use error::{BoxError, Error, Result};
pub use extract::{Extractor, JsonDirExtractor};
pub use faces::assemble_model;
pub use naming::{GroupRole, ObjectRole};
pub use pipeline::{PackedArchive, build_archive};
pub use scene::{assemble_scene, export_scene, lod_layers};
pub use source::{
    LayerSource, MarkerSource, MaterialSource, MeshSource, NamedMesh, PolygonSource, SceneSource,
    VertexSource,
};

pub use cartpack_codec as codec;
