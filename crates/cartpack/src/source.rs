//! Normalized scene view handed over by the extraction stage.
//!
//! The authoring tool is driven by an external collaborator that flattens
//! its scene into these types. They are read-only here: built once per
//! export, encoded, then dropped. All positions are in authoring space
//! (Z-up).

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSource {
    /// Level of detail collections, in any order.
    pub layers: Vec<LayerSource>,
    /// Empty objects; only `anchor:<id>` ones are exported.
    pub markers: Vec<MarkerSource>,
    /// Meshes outside the LOD collections; only `hull:<id>` ones are exported.
    pub convex_meshes: Vec<NamedMesh>,
}

/// The `lod<index>` collection of the scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerSource {
    pub index: usize,
    #[serde(default)]
    pub lod_dist: Option<u32>,
    pub mesh: MeshSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSource {
    pub vertices: Vec<VertexSource>,
    pub polygons: Vec<PolygonSource>,
    #[serde(default)]
    pub materials: Vec<MaterialSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexSource {
    pub position: Vec3,
    /// Names of the vertex groups this vertex is assigned to.
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonSource {
    /// Vertex indices in loop order.
    pub vertices: Vec<usize>,
    pub normal: Vec3,
    /// Index into [`MeshSource::materials`].
    #[serde(default)]
    pub material: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSource {
    pub backface_culling: bool,
    /// Linear RGB, 0..1 per channel.
    pub diffuse: [f32; 3],
    /// The `edges` custom property.
    #[serde(default)]
    pub edges: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSource {
    pub name: String,
    /// World transform.
    pub transform: Mat4,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedMesh {
    pub name: String,
    pub mesh: MeshSource,
}
