//! Face assembly.
//!
//! Turns the polygons of a [`MeshSource`] into codec faces: ring validation,
//! material style, group membership (collider, animation frame, decal) and
//! decal nesting under their parent face.
//!
//! A polygon belongs to a group only if every vertex of its loop does. It
//! may belong to at most one non-decal group and at most one decal group.

use std::collections::{BTreeSet, HashMap};

use cartpack_codec::{
    DEFAULT_COLOR, EncodeError, Face, Model, Polygon, Ring, Style, diffuse_to_color,
};

use crate::error::{Error, Result};
use crate::naming::GroupRole;
use crate::source::{MeshSource, PolygonSource};

/// A classified polygon, before decals are nested.
struct Candidate<'a> {
    polygon: Polygon,
    normal: glam::Vec3,
    /// Plain group the polygon belongs to, if any.
    group: Option<&'a str>,
    /// `(decal group, parent group)` if the polygon is a decal.
    decal: Option<(&'a str, &'a str)>,
}

/// Assemble the model of one LOD layer.
pub fn assemble_model(mesh: &MeshSource) -> Result<Model> {
    let vertex_groups: Vec<BTreeSet<&str>> = mesh
        .vertices
        .iter()
        .map(|vertex| vertex.groups.iter().map(String::as_str).collect())
        .collect();

    let candidates = mesh
        .polygons
        .iter()
        .map(|polygon| classify(mesh, &vertex_groups, polygon))
        .collect::<Result<Vec<_>>>()?;

    let parents = resolve_parents(&candidates)?;

    let mut decals: Vec<Vec<Polygon>> = vec![Vec::new(); candidates.len()];
    for (candidate, parent) in candidates.iter().zip(&parents) {
        if let Some(parent) = parent {
            decals[*parent].push(candidate.polygon.clone());
        }
    }

    let faces: Vec<Face> = candidates
        .into_iter()
        .zip(decals)
        .filter(|(candidate, _)| candidate.decal.is_none())
        .map(|(candidate, decals)| Face {
            polygon: candidate.polygon,
            decals,
            normal: candidate.normal,
        })
        .collect();

    let model = Model {
        vertices: mesh.vertices.iter().map(|vertex| vertex.position).collect(),
        faces,
    };
    debug_assert_eq!(model.polygon_count(), mesh.polygons.len());
    tracing::debug!(
        vertices = model.vertices.len(),
        faces = model.faces.len(),
        decals = mesh.polygons.len() - model.faces.len(),
        "Assembled model"
    );
    Ok(model)
}

fn classify<'a>(
    mesh: &MeshSource,
    vertex_groups: &[BTreeSet<&'a str>],
    source: &PolygonSource,
) -> Result<Candidate<'a>> {
    if let Some(&index) = source.vertices.iter().find(|&&i| i >= vertex_groups.len()) {
        return Err(Error::Malformed(format!(
            "polygon uses vertex {index} but the mesh has {}",
            vertex_groups.len()
        )));
    }
    let ring = Ring::from_indices(&source.vertices)?;

    let mut shared = vertex_groups[source.vertices[0]].clone();
    for &index in &source.vertices[1..] {
        shared.retain(|group| vertex_groups[index].contains(group));
    }

    let mut decal = None;
    let mut membership: Option<(&str, GroupRole<'_>)> = None;
    let mut solid: Option<u8> = None;
    for name in shared {
        let role = GroupRole::parse(name)?;
        match role {
            GroupRole::Decal { parent } => {
                if let Some((first, _)) = decal {
                    return Err(ambiguous(first, name));
                }
                decal = Some((name, parent));
                continue;
            }
            GroupRole::Solid(id) => {
                if let Some(first) = solid {
                    return Err(EncodeError::MultipleSolids { first, second: id }.into());
                }
                solid = Some(id);
            }
            GroupRole::Frame(_) | GroupRole::Named(_) => {}
        }
        if let Some((first, _)) = membership {
            return Err(ambiguous(first, name));
        }
        membership = Some((name, role));
    }

    let (frame, group) = match membership {
        Some((_, GroupRole::Frame(frame))) => (Some(frame), None),
        Some((_, GroupRole::Named(group))) => (None, Some(group)),
        _ => (None, None),
    };

    Ok(Candidate {
        polygon: Polygon {
            style: style(mesh, source)?,
            frame,
            solid,
            ring,
        },
        normal: source.normal,
        group,
        decal,
    })
}

fn ambiguous(first: &str, second: &str) -> Error {
    EncodeError::AmbiguousGroup {
        first: first.to_owned(),
        second: second.to_owned(),
    }
    .into()
}

fn style(mesh: &MeshSource, source: &PolygonSource) -> Result<Style> {
    let Some(index) = source.material else {
        return Ok(Style {
            color: DEFAULT_COLOR,
            dual_sided: false,
            edges: false,
        });
    };
    let material = mesh.materials.get(index).ok_or_else(|| {
        Error::Malformed(format!(
            "polygon uses material {index} but the mesh has {}",
            mesh.materials.len()
        ))
    })?;
    Ok(Style {
        color: diffuse_to_color(material.diffuse)?,
        dual_sided: !material.backface_culling,
        edges: material.edges,
    })
}

/// For every candidate, the index of the face it is nested under.
fn resolve_parents(candidates: &[Candidate<'_>]) -> Result<Vec<Option<usize>>> {
    let mut by_group: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        if let (Some(group), None) = (candidate.group, candidate.decal) {
            by_group.entry(group).or_default().push(index);
        }
    }

    candidates
        .iter()
        .map(|candidate| {
            let Some((group, parent)) = candidate.decal else {
                return Ok(None);
            };
            match by_group.get(parent).map(Vec::as_slice) {
                Some(&[index]) => Ok(Some(index)),
                None | Some(&[]) => Err(EncodeError::OrphanDecal {
                    group: group.to_owned(),
                    parent: parent.to_owned(),
                }
                .into()),
                Some(indices) => Err(EncodeError::AmbiguousDecalParent {
                    group: group.to_owned(),
                    parent: parent.to_owned(),
                    count: indices.len(),
                }
                .into()),
            }
        })
        .collect()
}
