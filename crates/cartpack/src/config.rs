//! Build configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::compress::CompressionParams;
use crate::error::{Error, Result};
use crate::extract::{is_plain_name, read_json};

/// What to pack and how.
///
/// ```json
/// { "models": ["mountain", "bf109"], "compress": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Archive entries, in order.
    pub models: Vec<String>,
    /// Run the compression stage on the archive.
    pub compress: bool,
    /// Search for the best compression parameters. Implies `compress`.
    pub search_compression: bool,
    /// Assemble and report only: no compression, no budget enforcement.
    pub dry_run: bool,
    /// Parameters used when not searching, and the search starting point.
    pub compression: CompressionParams,
}

impl BuildConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Whether the compression stage runs at all.
    #[must_use]
    pub fn compression_enabled(&self) -> bool {
        (self.compress || self.search_compression) && !self.dry_run
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &self.models {
            if name.is_empty() {
                return Err(Error::Config("model names must not be empty".into()));
            }
            if !is_plain_name(name) {
                return Err(Error::Config(format!(
                    "model name {name:?} must not contain path separators"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::Config(format!("model {name:?} is listed twice")));
            }
        }
        Ok(())
    }
}
