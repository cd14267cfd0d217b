//! LOD enumeration and scene assembly.

use std::collections::BTreeMap;

use cartpack_codec::{DEFAULT_LOD_DISTANCE, Layer, Scene, encode_scene};

use crate::auxiliary::{collect_anchors, collect_hulls};
use crate::error::{Error, Result};
use crate::faces::assemble_model;
use crate::source::{LayerSource, SceneSource};

/// Layers numbered contiguously from 0.
///
/// Numbering stops at the first missing index; layers past the gap are
/// dropped.
pub fn lod_layers(layers: &[LayerSource]) -> Result<Vec<&LayerSource>> {
    let mut by_index = BTreeMap::new();
    for layer in layers {
        if by_index.insert(layer.index, layer).is_some() {
            return Err(Error::Malformed(format!(
                "LOD {} is declared twice",
                layer.index
            )));
        }
    }

    let lods: Vec<&LayerSource> = (0..)
        .map_while(|index| by_index.get(&index).copied())
        .collect();
    if lods.len() < by_index.len() {
        tracing::debug!(
            kept = lods.len(),
            dropped = by_index.len() - lods.len(),
            "LOD numbering discontinued"
        );
    }
    Ok(lods)
}

/// Build the codec scene for one model.
pub fn assemble_scene(source: &SceneSource) -> Result<Scene> {
    let layers = lod_layers(&source.layers)?
        .into_iter()
        .map(|layer| -> Result<Layer> {
            Ok(Layer {
                lod_distance: layer.lod_dist.unwrap_or(DEFAULT_LOD_DISTANCE),
                model: assemble_model(&layer.mesh)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Scene {
        anchors: collect_anchors(&source.markers)?,
        hulls: collect_hulls(&source.convex_meshes)?,
        layers,
    })
}

/// Assemble and encode one model.
pub fn export_scene(source: &SceneSource) -> Result<Vec<u8>> {
    Ok(encode_scene(&assemble_scene(source)?)?)
}
