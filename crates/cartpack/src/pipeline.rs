//! Archive build pipeline.
//!
//! ```text
//! extract -> assemble -> encode scene -> archive -> [compress] -> budget
//! ```
//!
//! Models are exported one after the other in declared order; any error
//! aborts the whole build and nothing is returned.

use cartpack_codec::{ArchiveEntry, MAX_ARCHIVE_SIZE, check_budget, encode_archive};

use crate::compress::{CompressionParams, Compressor, compress, compress_smallest, ratio};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::scene::export_scene;

/// Final archive bytes, ready for cartridge packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedArchive {
    /// Archive bytes, compressed if compression ran.
    pub data: Vec<u8>,
    /// Length of the archive before compression.
    pub uncompressed_len: usize,
    /// Parameters used, if compression ran.
    pub compression: Option<CompressionParams>,
}

/// Export every configured model and pack them into one archive.
pub fn build_archive(
    config: &BuildConfig,
    extractor: &dyn Extractor,
    compressor: Option<&dyn Compressor>,
) -> Result<PackedArchive> {
    config.validate()?;
    let compressor = match (config.compression_enabled(), compressor) {
        (true, None) => {
            return Err(Error::Config(
                "compression requested but no compressor available".into(),
            ));
        }
        (true, Some(compressor)) => Some(compressor),
        (false, _) => None,
    };

    let mut entries = Vec::with_capacity(config.models.len());
    for name in &config.models {
        tracing::info!("Exporting: {name}");
        let source = extractor.extract(name)?;
        let blob = export_scene(&source)?;
        tracing::debug!(model = %name, bytes = blob.len(), "Encoded model");
        entries.push(ArchiveEntry {
            name: name.clone(),
            blob,
        });
    }
    let archive = encode_archive(&entries)?;
    let uncompressed_len = archive.len();

    if config.dry_run {
        if uncompressed_len > MAX_ARCHIVE_SIZE {
            tracing::warn!(
                "Game data too large ({uncompressed_len} bytes), exceeds max. {MAX_ARCHIVE_SIZE} bytes"
            );
        }
        return Ok(PackedArchive {
            data: archive,
            uncompressed_len,
            compression: None,
        });
    }

    let (data, compression) = match compressor {
        Some(compressor) => {
            let compressed = if config.search_compression {
                compress_smallest(compressor, &archive, config.compression)?
            } else {
                compress(compressor, &archive, config.compression)?
            };
            (compressed.data, Some(compressed.params))
        }
        None => (archive, None),
    };

    check_budget(data.len())?;
    tracing::info!(
        "Packed {} models: {} bytes ({:.2}% of {} bytes)",
        entries.len(),
        data.len(),
        ratio(data.len(), uncompressed_len),
        uncompressed_len
    );
    Ok(PackedArchive {
        data,
        uncompressed_len,
        compression,
    })
}
