//! End-to-end archive builds, checked with the reference decoder.

use std::collections::BTreeMap;

use cartpack::codec::ErrorKind;
use cartpack::codec::face::{FLAG_DECALS, FLAG_DUAL_SIDED, FLAG_FRAME, FLAG_QUAD, FLAG_SOLID};
use cartpack::codec::testing::decode_archive;
use cartpack::{
    BoxError, BuildConfig, CompressionParams, Compressor, Error, JsonDirExtractor, LayerSource,
    MarkerSource, MaterialSource, MeshSource, NamedMesh, PolygonSource, SceneSource,
    VertexSource, build_archive,
};
use glam::{Mat4, Vec3};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn vertex(position: Vec3, groups: &[&str]) -> VertexSource {
    VertexSource {
        position,
        groups: groups.iter().map(|g| (*g).to_owned()).collect(),
    }
}

fn polygon(vertices: &[usize], material: usize) -> PolygonSource {
    PolygonSource {
        vertices: vertices.to_vec(),
        normal: Vec3::Z,
        material: Some(material),
    }
}

/// A small aircraft: a solid fuselage quad, a wing with two decals, an
/// animated propeller blade and a plain tail triangle.
fn aircraft() -> SceneSource {
    let wing: &[&str] = &["wing"];
    let decal: &[&str] = &["wing:decal"];
    let vertices = vec![
        // 0..4 fuselage
        vertex(Vec3::new(-1.0, -4.0, 0.0), &["SOLID_1"]),
        vertex(Vec3::new(1.0, -4.0, 0.0), &["SOLID_1"]),
        vertex(Vec3::new(1.0, 4.0, 0.0), &["SOLID_1"]),
        vertex(Vec3::new(-1.0, 4.0, 0.0), &["SOLID_1"]),
        // 4..7 wing
        vertex(Vec3::new(-6.0, 0.0, 0.5), wing),
        vertex(Vec3::new(6.0, 0.0, 0.5), wing),
        vertex(Vec3::new(0.0, 2.0, 0.5), wing),
        // 7..13 roundels
        vertex(Vec3::new(-4.0, 0.5, 0.51), decal),
        vertex(Vec3::new(-3.0, 0.5, 0.51), decal),
        vertex(Vec3::new(-3.5, 1.0, 0.51), decal),
        vertex(Vec3::new(3.0, 0.5, 0.51), decal),
        vertex(Vec3::new(4.0, 0.5, 0.51), decal),
        vertex(Vec3::new(3.5, 1.0, 0.51), decal),
        // 13..16 propeller
        vertex(Vec3::new(0.0, 4.5, 0.0), &["frame:1"]),
        vertex(Vec3::new(0.2, 4.5, 1.0), &["frame:1"]),
        vertex(Vec3::new(-0.2, 4.5, 1.0), &["frame:1"]),
        // 16..19 tail
        vertex(Vec3::new(0.0, -4.0, 0.0), &[]),
        vertex(Vec3::new(0.0, -5.0, 0.0), &[]),
        vertex(Vec3::new(0.0, -5.0, 1.5), &[]),
    ];
    let materials = vec![
        MaterialSource {
            backface_culling: true,
            diffuse: [0.372_549_03, 0.341_176_48, 0.309_803_93],
            edges: false,
        },
        MaterialSource {
            backface_culling: false,
            diffuse: [1.0, 0.0, 0.301_960_78],
            edges: false,
        },
    ];
    let polygons = vec![
        polygon(&[7, 8, 9], 1),
        polygon(&[0, 1, 2, 3], 0),
        polygon(&[4, 5, 6], 0),
        polygon(&[13, 14, 15], 0),
        polygon(&[10, 11, 12], 1),
        polygon(&[16, 17, 18], 0),
    ];
    let lod0 = MeshSource {
        vertices,
        polygons,
        materials,
    };
    let lod1 = MeshSource {
        vertices: vec![
            vertex(Vec3::ZERO, &[]),
            vertex(Vec3::X, &[]),
            vertex(Vec3::Y, &[]),
        ],
        polygons: vec![PolygonSource {
            vertices: vec![0, 1, 2],
            normal: Vec3::Z,
            material: None,
        }],
        materials: Vec::new(),
    };

    SceneSource {
        layers: vec![
            LayerSource {
                index: 1,
                lod_dist: None,
                mesh: lod1,
            },
            LayerSource {
                index: 0,
                lod_dist: Some(64),
                mesh: lod0,
            },
            LayerSource {
                index: 3,
                lod_dist: Some(4096),
                mesh: MeshSource::default(),
            },
        ],
        markers: vec![
            MarkerSource {
                name: "anchor:2".into(),
                transform: Mat4::from_translation(Vec3::new(0.0, 4.0, 0.5)),
            },
            MarkerSource {
                name: "Camera".into(),
                transform: Mat4::IDENTITY,
            },
        ],
        convex_meshes: vec![NamedMesh {
            name: "hull:1".into(),
            mesh: MeshSource {
                vertices: vec![vertex(Vec3::new(0.0, 0.0, 1.0), &[])],
                polygons: vec![PolygonSource {
                    vertices: vec![0, 0, 0],
                    normal: Vec3::Z,
                    material: None,
                }],
                materials: Vec::new(),
            },
        }],
    }
}

fn models(scenes: &[(&str, SceneSource)]) -> BTreeMap<String, SceneSource> {
    scenes
        .iter()
        .map(|(name, scene)| ((*name).to_owned(), scene.clone()))
        .collect()
}

fn config(names: &[&str]) -> BuildConfig {
    BuildConfig {
        models: names.iter().map(|n| (*n).to_owned()).collect(),
        ..BuildConfig::default()
    }
}

#[test]
fn aircraft_round_trip() {
    init_tracing();
    let extractor = models(&[("bf109", aircraft()), ("mountain", SceneSource::default())]);
    let packed = build_archive(&config(&["mountain", "bf109"]), &extractor, None).unwrap();
    assert_eq!(packed.compression, None);
    assert_eq!(packed.data.len(), packed.uncompressed_len);

    let archive = decode_archive(&packed.data);
    let names: Vec<&str> = archive.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["mountain", "bf109"]);

    let mountain = &archive[0].1;
    assert!(mountain.layers.is_empty());

    let bf109 = &archive[1].1;
    assert_eq!(bf109.anchors.len(), 1);
    assert_eq!(bf109.anchors[0].id, 2);
    assert!(bf109.anchors[0].forward.abs_diff_eq(Vec3::Z, 1e-6));
    assert_eq!(bf109.hulls.len(), 1);
    assert_eq!(bf109.hulls[0].planes.len(), 1);

    // LOD 3 sits past the gap at 2.
    assert_eq!(bf109.layers.len(), 2);
    assert_eq!(bf109.layers[0].lod_distance, 64);
    assert_eq!(bf109.layers[1].lod_distance, 1024);

    let lod0 = &bf109.layers[0].model;
    assert_eq!(lod0.vertices.len(), 19);
    // 6 polygons, 2 of them decals.
    assert_eq!(lod0.faces.len(), 4);
    let nested: usize = lod0.faces.iter().map(|f| f.decals.len()).sum();
    assert_eq!(lod0.faces.len() + nested, 6);

    let fuselage = &lod0.faces[0].polygon;
    assert_eq!(fuselage.flags, FLAG_QUAD | FLAG_SOLID);
    assert_eq!(fuselage.color, 5);
    assert_eq!(fuselage.solid, Some(1));
    assert_eq!(fuselage.ring, [0, 1, 2, 3]);

    let wing = &lod0.faces[1];
    assert_eq!(wing.polygon.flags, FLAG_DECALS);
    assert_eq!(wing.decals.len(), 2);
    assert_eq!(wing.decals[0].ring, [7, 8, 9]);
    assert_eq!(wing.decals[1].ring, [10, 11, 12]);
    assert!(wing.decals.iter().all(|d| d.color == 8));
    assert!(wing.decals.iter().all(|d| d.flags == FLAG_DUAL_SIDED));

    let propeller = &lod0.faces[2].polygon;
    assert_eq!(propeller.flags, FLAG_FRAME);
    assert_eq!(propeller.frame, Some(1));

    let tail = &lod0.faces[3];
    assert_eq!(tail.polygon.flags, 0);
    assert!(tail.normal.abs_diff_eq(Vec3::Z, 1e-6));

    let lod1 = &bf109.layers[1].model;
    assert_eq!(lod1.faces[0].polygon.color, 1);
}

#[test]
fn archive_one_byte_over_budget_fails() {
    // 7 bytes of archive framing + 32761 bytes of scene = 32768.
    let heavy = SceneSource {
        layers: vec![LayerSource {
            index: 0,
            lod_dist: Some(0),
            mesh: MeshSource {
                vertices: vec![vertex(Vec3::ZERO, &[]); 5459],
                polygons: Vec::new(),
                materials: Vec::new(),
            },
        }],
        ..SceneSource::default()
    };
    let extractor = models(&[("bf109", heavy)]);

    let err = build_archive(&config(&["bf109"]), &extractor, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BudgetExceeded);
    assert!(err.to_string().contains("32768"), "{err}");

    let mut dry = config(&["bf109"]);
    dry.dry_run = true;
    let packed = build_archive(&dry, &extractor, None).unwrap();
    assert_eq!(packed.data.len(), 32768);
}

#[test]
fn budget_applies_to_compressed_bytes() {
    let extractor = models(&[("bf109", aircraft())]);
    let mut cfg = config(&["bf109"]);
    cfg.compress = true;

    let shrink = |data: &[u8], _: CompressionParams| -> Result<Vec<u8>, BoxError> {
        Ok(data[..data.len() / 2].to_vec())
    };
    let packed = build_archive(&cfg, &extractor, Some(&shrink as &dyn Compressor)).unwrap();
    assert_eq!(packed.data.len(), packed.uncompressed_len / 2);
    assert_eq!(packed.compression, Some(CompressionParams::default()));

    let bloat = |_: &[u8], _: CompressionParams| -> Result<Vec<u8>, BoxError> {
        Ok(vec![0; 40_000])
    };
    let err = build_archive(&cfg, &extractor, Some(&bloat as &dyn Compressor)).unwrap_err();
    assert!(matches!(
        err,
        Error::Encode(cartpack::codec::EncodeError::BudgetExceeded {
            size: 40_000,
            ..
        })
    ));
}

#[test]
fn searched_parameters_are_reported() {
    let extractor = models(&[("bf109", aircraft())]);
    let mut cfg = config(&["bf109"]);
    cfg.search_compression = true;

    let best_at_six = |data: &[u8], params: CompressionParams| -> Result<Vec<u8>, BoxError> {
        let penalty = usize::from(params.min_match.abs_diff(6));
        Ok(vec![0; data.len() / 3 + penalty])
    };
    let packed = build_archive(&cfg, &extractor, Some(&best_at_six as &dyn Compressor)).unwrap();
    assert_eq!(packed.compression.map(|p| p.min_match), Some(6));
}

#[test]
fn compression_without_compressor_is_a_config_error() {
    let extractor = models(&[("bf109", aircraft())]);
    let mut cfg = config(&["bf109"]);
    cfg.compress = true;
    assert!(matches!(
        build_archive(&cfg, &extractor, None),
        Err(Error::Config(_))
    ));
}

#[test]
fn any_model_error_aborts_the_build() {
    let mut broken = aircraft();
    broken.layers[1].mesh.polygons[0].vertices = vec![0, 1, 2, 3, 4];
    let extractor = models(&[("bf109", aircraft()), ("broken", broken)]);
    let err = build_archive(&config(&["bf109", "broken"]), &extractor, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Topology);

    let err = build_archive(&config(&["bf109", "missing"]), &extractor, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Collaborator);
}

#[test]
fn build_from_json_files() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let scene = serde_json::to_string(&aircraft()).unwrap();
    std::fs::write(dir.path().join("bf109.json"), scene).unwrap();
    std::fs::write(
        dir.path().join("build.json"),
        r#"{"models": ["bf109"], "dry_run": true}"#,
    )
    .unwrap();

    let cfg = BuildConfig::from_json_file(dir.path().join("build.json")).unwrap();
    let packed = build_archive(&cfg, &JsonDirExtractor::new(dir.path()), None).unwrap();
    let archive = decode_archive(&packed.data);
    assert_eq!(archive[0].0, "bf109");
    assert_eq!(archive[0].1.layers[0].model.faces.len(), 4);
}
