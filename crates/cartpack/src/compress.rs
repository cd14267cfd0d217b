//! Compression stage interface.
//!
//! The console side ships a matching decompressor, so the compressor itself
//! is an external collaborator. This module only chooses its parameters.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{BoxError, Error, Result};

/// Minimum match lengths tried by [`compress_smallest`].
pub const MIN_MATCH_CANDIDATES: RangeInclusive<u8> = 0..=7;

/// Parameters of the LZ-style compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionParams {
    /// Bits used for back-reference offsets.
    pub window_offset: u8,
    /// Bits used for match lengths.
    pub min_match: u8,
}

impl Default for CompressionParams {
    fn default() -> Self {
        Self {
            window_offset: 8,
            min_match: 3,
        }
    }
}

impl fmt::Display for CompressionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O:{} L:{}", self.window_offset, self.min_match)
    }
}

/// A `bytes -> bytes` transform the runtime can invert.
pub trait Compressor {
    fn compress(
        &self,
        data: &[u8],
        params: CompressionParams,
    ) -> std::result::Result<Vec<u8>, BoxError>;
}

impl<F> Compressor for F
where
    F: Fn(&[u8], CompressionParams) -> std::result::Result<Vec<u8>, BoxError>,
{
    fn compress(
        &self,
        data: &[u8],
        params: CompressionParams,
    ) -> std::result::Result<Vec<u8>, BoxError> {
        self(data, params)
    }
}

/// Compressed bytes and the parameters that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub data: Vec<u8>,
    pub params: CompressionParams,
}

/// Compress with fixed parameters.
pub fn compress(
    compressor: &dyn Compressor,
    data: &[u8],
    params: CompressionParams,
) -> Result<Compressed> {
    let data = compressor
        .compress(data, params)
        .map_err(|source| Error::Compression { params, source })?;
    Ok(Compressed { data, params })
}

/// Try every candidate minimum match length and keep the smallest output.
///
/// `params` is tried first and wins ties.
pub fn compress_smallest(
    compressor: &dyn Compressor,
    data: &[u8],
    params: CompressionParams,
) -> Result<Compressed> {
    let mut best = compress(compressor, data, params)?;
    for min_match in MIN_MATCH_CANDIDATES {
        if min_match == params.min_match {
            continue;
        }
        let candidate = compress(compressor, data, CompressionParams { min_match, ..params })?;
        if candidate.data.len() < best.data.len() {
            best = candidate;
        }
    }

    tracing::debug!(
        "Best compression parameters: {} - ratio: {:.2}%",
        best.params,
        ratio(best.data.len(), data.len())
    );
    Ok(best)
}

/// `compressed` as a percentage of `original`.
#[must_use]
pub fn ratio(compressed: usize, original: usize) -> f64 {
    if original == 0 {
        return 100.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = 100.0 * compressed as f64 / original as f64;
    ratio
}
