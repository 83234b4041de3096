//! Quantization for lossy compression

use blockdct_core::consts::{MAX_QUALITY, MIN_QUALITY, STANDARD_BLOCK_SIZE};
use blockdct_core::{BlockDctError, BlockDctResult};

use crate::Block;

/// Standard JPEG luminance quantization table (Annex K), row-major
pub const JPEG_LUMA_BASE: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, 12, 12, 14, 19, 26, 58, 60, 55, 14, 13, 16, 24, 40, 57, 69,
    56, 14, 17, 22, 29, 51, 87, 80, 62, 18, 22, 37, 56, 68, 109, 103, 77, 24, 35, 55, 64, 81,
    104, 113, 92, 49, 64, 78, 87, 103, 121, 120, 101, 72, 92, 95, 98, 112, 100, 103, 99,
];

/// Reject qualities outside 1-100
pub fn validate_quality(quality: u32) -> BlockDctResult<()> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(BlockDctError::QualityOutOfRange(quality));
    }
    Ok(())
}

/// Reject a zero block size, or one whose `size * size` block of `f64`
/// cannot be allocated
pub fn validate_block_size(block_size: usize) -> BlockDctResult<()> {
    let bytes = block_size
        .checked_mul(block_size)
        .and_then(|n| n.checked_mul(std::mem::size_of::<f64>()));
    match bytes {
        Some(bytes) if block_size > 0 && bytes <= isize::MAX as usize => Ok(()),
        _ => Err(BlockDctError::InvalidBlockSize(block_size)),
    }
}

/// JPEG quality curve: 5000/q below 50, 200 - 2q from 50 up
pub fn quality_scale(quality: u32) -> f64 {
    let q = quality as f64;
    if q < 50.0 {
        5000.0 / q
    } else {
        200.0 - 2.0 * q
    }
}

/// Quantization divisors for one block size, every entry at least 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantMatrix {
    size: usize,
    values: Vec<u32>,
}

impl QuantMatrix {
    /// Generate the matrix for `quality` (1-100) and `block_size`.
    ///
    /// 8x8 blocks scale the standard luminance table; other sizes scale a
    /// synthetic base of `1 + (i + j) / 2`, which weights high frequencies the
    /// same way.
    pub fn generate(quality: u32, block_size: usize) -> BlockDctResult<Self> {
        validate_quality(quality)?;
        validate_block_size(block_size)?;

        let scale = quality_scale(quality);
        let n = block_size;
        let mut values = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let base = base_entry(i, j, n);
                let q = ((base * scale + 50.0) / 100.0).floor().max(1.0);
                values.push(q as u32);
            }
        }

        Ok(Self { size: n, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.values[i * self.size + j]
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Snap every coefficient to the nearest multiple of its divisor
    /// (ties to even), in place
    pub fn quantize_block(&self, coeffs: &mut Block) -> BlockDctResult<()> {
        if coeffs.size() != self.size {
            return Err(BlockDctError::BlockSizeMismatch {
                expected: self.size,
                actual: coeffs.size(),
            });
        }

        for (c, &q) in coeffs.values_mut().iter_mut().zip(&self.values) {
            let q = q as f64;
            *c = (*c / q).round_ties_even() * q;
        }
        Ok(())
    }
}

fn base_entry(i: usize, j: usize, size: usize) -> f64 {
    if size == STANDARD_BLOCK_SIZE {
        JPEG_LUMA_BASE[i * STANDARD_BLOCK_SIZE + j] as f64
    } else {
        1.0 + (i + j) as f64 * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_50_is_base_table() {
        let matrix = QuantMatrix::generate(50, 8).unwrap();
        let expected: Vec<u32> = JPEG_LUMA_BASE.iter().map(|&v| v as u32).collect();
        assert_eq!(matrix.values(), expected.as_slice());
    }

    #[test]
    fn test_quality_100_is_all_ones() {
        for size in [1, 4, 8, 16] {
            let matrix = QuantMatrix::generate(100, size).unwrap();
            assert!(matrix.values().iter().all(|&v| v == 1), "size {}", size);
        }
    }

    #[test]
    fn test_scale_curve() {
        assert_eq!(quality_scale(1), 5000.0);
        assert_eq!(quality_scale(10), 500.0);
        assert_eq!(quality_scale(50), 100.0);
        assert_eq!(quality_scale(75), 50.0);
        assert_eq!(quality_scale(100), 0.0);

        // floor((16 * 500 + 50) / 100) = 80
        assert_eq!(QuantMatrix::generate(10, 8).unwrap().get(0, 0), 80);
        // floor((16 * 50 + 50) / 100) = 8
        assert_eq!(QuantMatrix::generate(75, 8).unwrap().get(0, 0), 8);
    }

    #[test]
    fn test_synthetic_base_for_other_sizes() {
        // At quality 50 each entry is floor(1 + (i + j) / 2 + 0.5)
        let matrix = QuantMatrix::generate(50, 4).unwrap();
        assert_eq!(matrix.get(0, 0), 1);
        assert_eq!(matrix.get(0, 1), 2);
        assert_eq!(matrix.get(1, 1), 2);
        assert_eq!(matrix.get(1, 2), 3);
        assert_eq!(matrix.get(3, 3), 4);
        assert_eq!(matrix.size(), 4);
        assert_eq!(matrix.values().len(), 16);
    }

    #[test]
    fn test_entries_never_zero() {
        for quality in MIN_QUALITY..=MAX_QUALITY {
            for size in [1, 2, 4, 8, 16] {
                let matrix = QuantMatrix::generate(quality, size).unwrap();
                assert!(
                    matrix.values().iter().all(|&v| v >= 1),
                    "quality {} size {}",
                    quality,
                    size
                );
            }
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            QuantMatrix::generate(0, 8),
            Err(BlockDctError::QualityOutOfRange(0))
        ));
        assert!(matches!(
            QuantMatrix::generate(101, 8),
            Err(BlockDctError::QualityOutOfRange(101))
        ));
        assert!(matches!(
            QuantMatrix::generate(50, 0),
            Err(BlockDctError::InvalidBlockSize(0))
        ));
    }

    #[test]
    fn test_quantize_block() {
        let matrix = QuantMatrix::generate(50, 8).unwrap();
        let mut coeffs = Block::zeros(8).unwrap();
        coeffs.set(0, 0, 24.0); // 24 / 16 = 1.5 -> 2
        coeffs.set(0, 1, 5.4); // 5.4 / 11 -> 0
        coeffs.set(1, 0, -30.0); // -30 / 12 = -2.5 -> -2
        coeffs.set(7, 7, 150.0); // 150 / 99 -> 2

        matrix.quantize_block(&mut coeffs).unwrap();

        assert_eq!(coeffs.get(0, 0), 32.0);
        assert_eq!(coeffs.get(0, 1), 0.0);
        assert_eq!(coeffs.get(1, 0), -24.0);
        assert_eq!(coeffs.get(7, 7), 198.0);
    }

    #[test]
    fn test_quantize_block_size_mismatch() {
        let matrix = QuantMatrix::generate(50, 8).unwrap();
        let mut coeffs = Block::from_vec(4, vec![24.0; 16]).unwrap();
        assert!(matches!(
            matrix.quantize_block(&mut coeffs),
            Err(BlockDctError::BlockSizeMismatch { expected: 8, actual: 4 })
        ));
        assert!(coeffs.values().iter().all(|&c| c == 24.0));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_unallocatable_block_size_rejected() {
        for size in [usize::MAX, 1 << 40, (isize::MAX as usize) / 8] {
            assert!(
                matches!(
                    QuantMatrix::generate(50, size),
                    Err(BlockDctError::InvalidBlockSize(s)) if s == size
                ),
                "size {}",
                size
            );
        }
        assert!(validate_block_size(1024).is_ok());
    }
}
