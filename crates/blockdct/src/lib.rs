//! # blockdct - block DCT image compression
//!
//! Simulates baseline-JPEG style lossy compression: each RGB channel is tiled
//! into square blocks, transformed with an orthonormal DCT, quantized with a
//! quality-scaled matrix, and immediately reconstructed. The reconstruction is
//! compared against the original with MSE and PSNR.
//!
//! ## Quick Start
//!
//! ```no_run
//! use blockdct::{compress, load_image};
//!
//! let image = load_image("input.png").unwrap();
//! let compression = compress(&image, 50, 8).unwrap();
//! let metrics = compression.metrics();
//! println!("MSE {:.2}, PSNR {:.2} dB", metrics.mse, metrics.psnr);
//! ```
//!
//! ### Explicit options
//!
//! ```
//! use blockdct::{CompressOptions, Compressor, Image};
//!
//! let image = Image::from_interleaved(2, 2, &[128; 12]).unwrap();
//! let compressor = Compressor::new(CompressOptions::default().quality(90).block_size(4));
//! let compression = compressor.compress(&image).unwrap();
//! assert_eq!(compression.reconstructed().dimensions(), image.dimensions());
//! ```
//!
//! ## Architecture
//!
//! - `blockdct-core`: pixel planes, images, errors
//! - `blockdct-transform`: DCT, quantization matrices, block tiling
//! - `blockdct-codec`: channel/image pipelines and metrics
//!
//! Entropy coding is out of scope: no compressed bitstream is produced. The
//! [`CompressionReport`] sizes come from re-encoding the reconstruction as
//! JPEG through the `image` crate.

pub mod io;
pub mod report;

// Re-export core types
pub use blockdct_core::{
    consts, BlockDctError, BlockDctResult, Channel, Dimensions, Image, PixelPlane,
};

// Re-export the kernel
pub use blockdct_transform::{Block, Dct2d, QuantMatrix};

// Re-export the pipeline
pub use blockdct_codec::{
    channel_metrics, compress, compress_channel, metrics, mse, psnr, psnr_from_mse,
    CompressOptions, Compression, Compressor, QualityMetrics, QualityRating,
};

pub use io::{decode_image, encode_jpeg, load_image, save_image};
pub use report::CompressionReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
