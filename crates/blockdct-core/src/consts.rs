//! Constants used throughout the codec

/// Minimum and maximum quality values (inclusive)
pub const MIN_QUALITY: u32 = 1;
pub const MAX_QUALITY: u32 = 100;

/// Default quality for lossy compression
pub const DEFAULT_QUALITY: u32 = 50;

/// Default block edge length in samples
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Block size that uses the standard JPEG luminance table
pub const STANDARD_BLOCK_SIZE: usize = 8;

/// Offset that centers 8-bit samples around zero before the transform
pub const LEVEL_SHIFT: f64 = 128.0;

/// Largest representable sample value
pub const MAX_SAMPLE: f64 = 255.0;

/// PSNR reported when two images are identical (MSE = 0)
pub const PSNR_CEILING: f64 = 100.0;

/// Number of color channels in an image
pub const NUM_CHANNELS: usize = 3;
