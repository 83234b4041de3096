//! Block DCT compression pipeline
//!
//! Tiles each channel of an RGB image into square blocks, runs every block
//! through level shift, forward DCT, quantization, inverse DCT and clipping,
//! and reassembles the channels. Fidelity of the reconstruction is measured
//! with MSE and PSNR.

pub mod metrics;
pub mod options;
pub mod pipeline;

pub use metrics::*;
pub use options::CompressOptions;
pub use pipeline::{compress, compress_channel, Compression, Compressor};
