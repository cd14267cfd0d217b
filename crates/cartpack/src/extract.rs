//! Extraction stage interface.
//!
//! Something outside this crate drives the authoring tool and flattens each
//! model into a [`SceneSource`]. Models are requested by name, one at a
//! time, in archive order.

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::source::SceneSource;

pub trait Extractor {
    fn extract(&self, model: &str) -> Result<SceneSource>;
}

/// Reads `<dir>/<model>.json` files written by the export script.
#[derive(Debug, Clone)]
pub struct JsonDirExtractor {
    dir: PathBuf,
}

impl JsonDirExtractor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding `model`. Names that would leave the directory are rejected.
    pub fn path_for(&self, model: &str) -> Result<PathBuf> {
        if !is_plain_name(model) {
            return Err(Error::Extraction {
                model: model.to_owned(),
                source: "model name is not a plain file name".into(),
            });
        }
        Ok(self.dir.join(format!("{model}.json")))
    }
}

impl Extractor for JsonDirExtractor {
    fn extract(&self, model: &str) -> Result<SceneSource> {
        read_json(&self.path_for(model)?)
    }
}

/// A single path component with no separators of either platform.
pub(crate) fn is_plain_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && matches!(
            Path::new(name).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        )
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })
}

fn missing(model: &str) -> Error {
    Error::Extraction {
        model: model.to_owned(),
        source: "no such model".into(),
    }
}

impl Extractor for HashMap<String, SceneSource> {
    fn extract(&self, model: &str) -> Result<SceneSource> {
        self.get(model).cloned().ok_or_else(|| missing(model))
    }
}

impl Extractor for BTreeMap<String, SceneSource> {
    fn extract(&self, model: &str) -> Result<SceneSource> {
        self.get(model).cloned().ok_or_else(|| missing(model))
    }
}
