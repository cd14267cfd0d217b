//! Error types for the archive build.

use std::path::PathBuf;

use cartpack_codec::{EncodeError, ErrorKind};

use crate::compress::CompressionParams;

/// Error returned by a collaborator stage.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an archive build.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Encoding rule violated.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Scene view handed over by the extraction stage is inconsistent.
    #[error("malformed scene data: {0}")]
    Malformed(String),

    /// Extraction stage failed.
    #[error("unable to extract model {model:?}")]
    Extraction {
        model: String,
        #[source]
        source: BoxError,
    },

    /// Compression stage failed.
    #[error("compression failed ({params})")]
    Compression {
        params: CompressionParams,
        #[source]
        source: BoxError,
    },

    /// Build configuration is unusable.
    #[error("invalid build configuration: {0}")]
    Config(String),

    #[error("unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encode(err) => err.kind(),
            _ => ErrorKind::Collaborator,
        }
    }
}
