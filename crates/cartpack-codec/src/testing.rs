//! Reference decoder for round-trip tests.
//!
//! Mirrors what the console runtime does when it walks an archive. Only
//! built for tests and with the `test-tools` feature; it panics on
//! malformed input instead of returning errors.

use glam::Vec3;

use crate::face::{FLAG_DECALS, FLAG_FRAME, FLAG_QUAD, FLAG_SOLID};

/// Cursor over an encoded blob.
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub fn byte(&mut self) -> u8 {
        let byte = self.bytes[self.pos];
        self.pos += 1;
        byte
    }

    pub fn word(&mut self) -> u16 {
        u16::from_be_bytes([self.byte(), self.byte()])
    }

    pub fn variant(&mut self) -> usize {
        let first = self.byte();
        if first & 0x80 == 0 {
            usize::from(first)
        } else {
            usize::from(u16::from_be_bytes([first, self.byte()]) - 0x8000)
        }
    }

    pub fn double(&mut self) -> f32 {
        f32::from(self.word()) / 128.0 - 128.0
    }

    /// Read a vector back into authoring axis order.
    pub fn vector(&mut self) -> Vec3 {
        let x = self.double();
        let z = self.double();
        let y = self.double();
        Vec3::new(x, y, z)
    }

    pub fn name(&mut self) -> String {
        let len = self.variant();
        let bytes = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        String::from_utf8_lossy(bytes).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPolygon {
    pub flags: u8,
    pub color: u8,
    pub frame: Option<u8>,
    pub solid: Option<u8>,
    /// 0-based vertex indices.
    pub ring: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFace {
    pub polygon: DecodedPolygon,
    pub decals: Vec<DecodedPolygon>,
    pub normal: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedModel {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<DecodedFace>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLayer {
    pub lod_distance: usize,
    pub model: DecodedModel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAnchor {
    pub id: u8,
    pub position: Vec3,
    pub forward: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedHull {
    pub id: u8,
    pub planes: Vec<(Vec3, f32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedScene {
    pub anchors: Vec<DecodedAnchor>,
    pub hulls: Vec<DecodedHull>,
    pub layers: Vec<DecodedLayer>,
}

fn read_polygon(reader: &mut Reader<'_>) -> DecodedPolygon {
    let flags = reader.byte();
    let color = reader.byte();
    let frame = (flags & FLAG_FRAME != 0).then(|| reader.byte());
    let solid = (flags & FLAG_SOLID != 0).then(|| reader.byte());
    let corners = if flags & FLAG_QUAD != 0 { 4 } else { 3 };
    let ring = (0..corners).map(|_| reader.variant() - 1).collect();
    DecodedPolygon {
        flags,
        color,
        frame,
        solid,
        ring,
    }
}

fn read_face(reader: &mut Reader<'_>) -> DecodedFace {
    let polygon = read_polygon(reader);
    let decals = if polygon.flags & FLAG_DECALS == 0 {
        Vec::new()
    } else {
        let count = reader.variant();
        (0..count).map(|_| read_polygon(reader)).collect()
    };
    let normal = reader.vector();
    DecodedFace {
        polygon,
        decals,
        normal,
    }
}

pub fn read_model(reader: &mut Reader<'_>) -> DecodedModel {
    let vertex_count = reader.variant();
    let vertices = (0..vertex_count).map(|_| reader.vector()).collect();
    let face_count = reader.variant();
    let faces = (0..face_count).map(|_| read_face(reader)).collect();
    DecodedModel { vertices, faces }
}

pub fn read_scene(reader: &mut Reader<'_>) -> DecodedScene {
    let anchor_count = reader.variant();
    let anchors = (0..anchor_count)
        .map(|_| DecodedAnchor {
            id: reader.byte(),
            position: reader.vector(),
            forward: reader.vector(),
        })
        .collect();

    let hull_count = reader.variant();
    let hulls = (0..hull_count)
        .map(|_| {
            let id = reader.byte();
            let plane_count = reader.variant();
            let planes = (0..plane_count)
                .map(|_| (reader.vector(), reader.double()))
                .collect();
            DecodedHull { id, planes }
        })
        .collect();

    let lod_count = reader.variant();
    let layers = (0..lod_count)
        .map(|_| DecodedLayer {
            lod_distance: reader.variant(),
            model: read_model(reader),
        })
        .collect();

    DecodedScene {
        anchors,
        hulls,
        layers,
    }
}

/// Decode a scene blob, asserting nothing is left over.
#[must_use]
pub fn decode_scene(bytes: &[u8]) -> DecodedScene {
    let mut reader = Reader::new(bytes);
    let scene = read_scene(&mut reader);
    assert!(reader.is_empty(), "trailing bytes after scene");
    scene
}

/// Decode an archive of scene entries, asserting nothing is left over.
#[must_use]
pub fn decode_archive(bytes: &[u8]) -> Vec<(String, DecodedScene)> {
    let mut reader = Reader::new(bytes);
    let count = reader.variant();
    let entries = (0..count)
        .map(|_| {
            let name = reader.name();
            (name, read_scene(&mut reader))
        })
        .collect();
    assert!(reader.is_empty(), "trailing bytes after archive");
    entries
}
