//! Anchors and collision hulls.

use cartpack_codec::{Anchor, Hull, Plane};
use glam::Vec3;

use crate::error::{Error, Result};
use crate::naming::ObjectRole;
use crate::source::{MarkerSource, NamedMesh};

/// Collect `anchor:<id>` markers.
///
/// The forward direction is the marker's local up axis after its world
/// transform, normalized.
pub fn collect_anchors(markers: &[MarkerSource]) -> Result<Vec<Anchor>> {
    let mut anchors = Vec::new();
    for marker in markers {
        let ObjectRole::Anchor(id) = ObjectRole::parse(&marker.name)? else {
            continue;
        };
        let forward = marker
            .transform
            .transform_vector3(Vec3::Z)
            .try_normalize()
            .ok_or_else(|| {
                Error::Malformed(format!("marker {:?} has a degenerate up axis", marker.name))
            })?;
        anchors.push(Anchor {
            id,
            position: marker.transform.transform_point3(Vec3::ZERO),
            forward,
        });
    }
    Ok(anchors)
}

/// Collect `hull:<id>` meshes, one plane per polygon.
pub fn collect_hulls(meshes: &[NamedMesh]) -> Result<Vec<Hull>> {
    let mut hulls = Vec::new();
    for named in meshes {
        let ObjectRole::Hull(id) = ObjectRole::parse(&named.name)? else {
            continue;
        };
        let mesh = &named.mesh;
        let planes = mesh
            .polygons
            .iter()
            .map(|polygon| -> Result<Plane> {
                let &first = polygon.vertices.first().ok_or_else(|| {
                    Error::Malformed(format!("hull {:?} has an empty polygon", named.name))
                })?;
                let vertex = mesh.vertices.get(first).ok_or_else(|| {
                    Error::Malformed(format!(
                        "hull {:?} uses vertex {first} but the mesh has {}",
                        named.name,
                        mesh.vertices.len()
                    ))
                })?;
                Ok(Plane::through(polygon.normal, vertex.position))
            })
            .collect::<Result<Vec<_>>>()?;
        hulls.push(Hull { id, planes });
    }
    Ok(hulls)
}
