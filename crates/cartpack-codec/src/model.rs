//! Model, layer and scene blobs.
//!
//! # Format
//!
//! ```text
//! scene  := anchors hulls lod_count:variant layer*
//! layer  := lod_distance:variant model
//! model  := vertex_count:variant vector* face_count:variant face*
//! ```

use glam::Vec3;

use crate::anchor::{Anchor, encode_anchors};
use crate::error::EncodeResult;
use crate::face::{Face, encode_face};
use crate::hull::{Hull, encode_hulls};
use crate::varint::pack_variant;
use crate::vector::pack_vector;

/// Visibility distance of a layer that does not declare one.
pub const DEFAULT_LOD_DISTANCE: u32 = 1024;

/// Vertices and top-level faces of one mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub vertices: Vec<Vec3>,
    /// Top-level faces; decals live inside their parent face.
    pub faces: Vec<Face>,
}

impl Model {
    /// Total number of face records, decals included.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.faces.iter().map(|face| 1 + face.decals.len()).sum()
    }
}

/// One level of detail.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Distance up to which this layer is drawn.
    pub lod_distance: u32,
    pub model: Model,
}

/// Everything exported for one archive entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub anchors: Vec<Anchor>,
    pub hulls: Vec<Hull>,
    /// Levels of detail, finest first.
    pub layers: Vec<Layer>,
}

/// Append a model blob.
pub fn encode_model(out: &mut Vec<u8>, model: &Model) -> EncodeResult<()> {
    pack_variant(out, model.vertices.len())?;
    for &vertex in &model.vertices {
        pack_vector(out, vertex)?;
    }

    pack_variant(out, model.faces.len())?;
    for face in &model.faces {
        encode_face(out, face, model.vertices.len())?;
    }
    Ok(())
}

/// Append a layer: visibility distance followed by its model.
pub fn encode_layer(out: &mut Vec<u8>, layer: &Layer) -> EncodeResult<()> {
    pack_variant(out, layer.lod_distance)?;
    encode_model(out, &layer.model)
}

/// Encode a complete scene blob.
pub fn encode_scene(scene: &Scene) -> EncodeResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_anchors(&mut out, &scene.anchors)?;
    encode_hulls(&mut out, &scene.hulls)?;
    pack_variant(&mut out, scene.layers.len())?;
    for layer in &scene.layers {
        encode_layer(&mut out, layer)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{Polygon, Ring, Style};

    fn triangle() -> Model {
        Model {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            faces: vec![Face {
                polygon: Polygon {
                    style: Style {
                        color: 1,
                        dual_sided: false,
                        edges: false,
                    },
                    frame: None,
                    solid: None,
                    ring: Ring::Triangle([0, 1, 2]),
                },
                decals: Vec::new(),
                normal: Vec3::Z,
            }],
        }
    }

    #[test]
    fn model_layout() {
        let mut out = Vec::new();
        encode_model(&mut out, &triangle()).unwrap();
        // vertex count + 3 vectors + face count + flags, color, 3 indices, normal
        assert_eq!(out.len(), 1 + 3 * 6 + 1 + 2 + 3 + 6);
        assert_eq!(out[0], 3);
        assert_eq!(out[19], 1);
    }

    #[test]
    fn default_lod_distance_takes_two_bytes() {
        let layer = Layer {
            lod_distance: DEFAULT_LOD_DISTANCE,
            model: Model::default(),
        };
        let mut out = Vec::new();
        encode_layer(&mut out, &layer).unwrap();
        assert_eq!(out, [0x84, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn scene_starts_with_auxiliary_blocks() {
        let scene = Scene {
            anchors: Vec::new(),
            hulls: Vec::new(),
            layers: vec![Layer {
                lod_distance: 16,
                model: triangle(),
            }],
        };
        let blob = encode_scene(&scene).unwrap();
        assert_eq!(&blob[..4], [0x00, 0x00, 0x01, 0x10]);
    }

    #[test]
    fn too_many_vertices() {
        let model = Model {
            vertices: vec![Vec3::ZERO; 32768],
            faces: Vec::new(),
        };
        assert!(encode_model(&mut Vec::new(), &model).is_err());
    }

    #[test]
    fn polygon_count_includes_decals() {
        let mut model = triangle();
        let decal = model.faces[0].polygon.clone();
        model.faces[0].decals.push(decal);
        assert_eq!(model.polygon_count(), 2);
    }
}
