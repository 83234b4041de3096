//! Size and fidelity summary of one compression run

use blockdct_codec::{Compression, QualityMetrics, QualityRating};
use blockdct_core::BlockDctResult;

use crate::io::encode_jpeg;

/// What a caller shows after compressing an image: fidelity plus the size
/// of the reconstruction once re-encoded as JPEG
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CompressionReport {
    /// dB, two decimals
    pub psnr: f64,
    /// two decimals
    pub mse: f64,
    pub rating: QualityRating,
    /// Size of the source container in bytes
    pub original_size: usize,
    /// Size of the re-encoded reconstruction in bytes
    pub compressed_size: usize,
    /// original / compressed, two decimals
    pub compression_ratio: f64,
    /// Percent of the original size saved, one decimal
    pub space_saved: f64,
}

impl CompressionReport {
    /// Re-encode the reconstruction as JPEG at `quality` and summarize
    pub fn build(
        original_size: usize,
        compression: &Compression,
        quality: u32,
    ) -> BlockDctResult<Self> {
        let encoded = encode_jpeg(compression.reconstructed(), quality)?;
        Ok(Self::from_sizes(
            compression.metrics(),
            original_size,
            encoded.len(),
        ))
    }

    pub fn from_sizes(
        metrics: QualityMetrics,
        original_size: usize,
        compressed_size: usize,
    ) -> Self {
        let compression_ratio = if compressed_size > 0 {
            original_size as f64 / compressed_size as f64
        } else {
            1.0
        };
        let space_saved = if original_size > 0 {
            (original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0
        } else {
            0.0
        };

        Self {
            psnr: round_to(metrics.psnr, 2),
            mse: round_to(metrics.mse, 2),
            rating: metrics.rating(),
            original_size,
            compressed_size,
            compression_ratio: round_to(compression_ratio, 2),
            space_saved: round_to(space_saved, 1),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
