//! Error types for block DCT operations

use thiserror::Error;

use crate::Dimensions;

/// Result type for block DCT operations
pub type BlockDctResult<T> = Result<T, BlockDctError>;

/// Errors that can occur while compressing images or measuring them
#[derive(Error, Debug)]
pub enum BlockDctError {
    #[error("Quality out of range: {0} (expected 1-100)")]
    QualityOutOfRange(u32),

    #[error("Invalid block size: {0}")]
    InvalidBlockSize(usize),

    #[error("Block size mismatch: expected {expected}, got {actual}")]
    BlockSizeMismatch { expected: usize, actual: usize },

    #[error("Inconsistent channel dimensions: red {red}, green {green}, blue {blue}")]
    InconsistentChannelDimensions {
        red: Dimensions,
        green: Dimensions,
        blue: Dimensions,
    },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Dimension mismatch: {original} vs {reconstructed}")]
    DimensionMismatch {
        original: Dimensions,
        reconstructed: Dimensions,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Decode(#[from] ::image::ImageError),
}
