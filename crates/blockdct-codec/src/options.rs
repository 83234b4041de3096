//! Compression options

use blockdct_core::consts;
use blockdct_core::BlockDctResult;
use blockdct_transform::{validate_block_size, validate_quality};

/// Compression options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOptions {
    /// Quality (1-100, higher is better)
    pub quality: u32,
    /// Edge length of the square blocks
    pub block_size: usize,
    /// Process channels and block rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            quality: consts::DEFAULT_QUALITY,
            block_size: consts::DEFAULT_BLOCK_SIZE,
            parallel: true,
        }
    }
}

impl CompressOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quality. Out-of-range values are rejected by [`validate`](Self::validate),
    /// not clamped.
    pub fn quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> BlockDctResult<()> {
        validate_quality(self.quality)?;
        validate_block_size(self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdct_core::BlockDctError;

    #[test]
    fn test_defaults() {
        let options = CompressOptions::default();
        assert_eq!(options.quality, 50);
        assert_eq!(options.block_size, 8);
        assert!(options.parallel);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_does_not_clamp() {
        let options = CompressOptions::new().quality(0).block_size(16).parallel(false);
        assert_eq!(options.quality, 0);
        assert!(!options.parallel);
        assert!(matches!(
            options.validate(),
            Err(BlockDctError::QualityOutOfRange(0))
        ));
        assert!(matches!(
            CompressOptions::new().block_size(0).validate(),
            Err(BlockDctError::InvalidBlockSize(0))
        ));
    }
}
