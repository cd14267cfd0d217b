//! Object and vertex group naming conventions.
//!
//! Artists tag geometry by name in the authoring tool. This module is the
//! only place those names are interpreted:
//!
//! | Name             | Applies to    | Meaning                              |
//! |------------------|---------------|--------------------------------------|
//! | `SOLID_1`..`8`   | vertex group  | collider id of the face              |
//! | `frame:<N>`      | vertex group  | animation frame of the face          |
//! | `<name>:decal`   | vertex group  | decal nested under the `<name>` face |
//! | anything else    | vertex group  | plain group, may parent decals       |
//! | `anchor:<id>`    | marker        | anchor with the given id             |
//! | `hull:<id>`      | mesh          | convex hull with the given id        |

use cartpack_codec::EncodeError;

use crate::error::{Error, Result};

pub const FRAME_PREFIX: &str = "frame:";
pub const DECAL_SUFFIX: &str = ":decal";
pub const ANCHOR_PREFIX: &str = "anchor:";
pub const HULL_PREFIX: &str = "hull:";

/// Collider groups and their ids.
pub const SOLID_GROUPS: [(&str, u8); 8] = [
    ("SOLID_1", 1),
    ("SOLID_2", 2),
    ("SOLID_3", 3),
    ("SOLID_4", 4),
    ("SOLID_5", 5),
    ("SOLID_6", 6),
    ("SOLID_7", 7),
    ("SOLID_8", 8),
];

/// What a vertex group means for the faces it fully contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole<'a> {
    Solid(u8),
    Frame(u8),
    Decal { parent: &'a str },
    Named(&'a str),
}

impl<'a> GroupRole<'a> {
    pub fn parse(name: &'a str) -> Result<Self> {
        if let Some(&(_, id)) = SOLID_GROUPS.iter().find(|(group, _)| *group == name) {
            return Ok(Self::Solid(id));
        }
        if let Some(digits) = name.strip_prefix(FRAME_PREFIX) {
            return parse_id("frame", name, digits).map(Self::Frame);
        }
        if let Some(parent) = name.strip_suffix(DECAL_SUFFIX) {
            if parent.is_empty() {
                return Err(Error::Malformed(format!(
                    "decal group {name:?} does not name a parent group"
                )));
            }
            return Ok(Self::Decal { parent });
        }
        Ok(Self::Named(name))
    }
}

/// What a scene object means to the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    Anchor(u8),
    Hull(u8),
    Other,
}

impl ObjectRole {
    pub fn parse(name: &str) -> Result<Self> {
        if let Some(digits) = name.strip_prefix(ANCHOR_PREFIX) {
            return parse_id("anchor", name, digits).map(Self::Anchor);
        }
        if let Some(digits) = name.strip_prefix(HULL_PREFIX) {
            return parse_id("hull", name, digits).map(Self::Hull);
        }
        Ok(Self::Other)
    }
}

/// Parse the numeric suffix of `name`. It must be a decimal number that fits
/// a byte.
fn parse_id(role: &'static str, name: &str, digits: &str) -> Result<u8> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Malformed(format!(
            "{name:?}: {role} id must be a decimal number"
        )));
    }
    // Only fails on absurdly long digit strings, still out of range.
    let value: u64 = digits.parse().unwrap_or(u64::MAX);
    u8::try_from(value).map_err(|_| EncodeError::out_of_range(role, name, "0..=255").into())
}
