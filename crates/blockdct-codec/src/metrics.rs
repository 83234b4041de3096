//! Fidelity metrics: MSE and PSNR

use std::fmt;

use blockdct_core::consts::{MAX_SAMPLE, PSNR_CEILING};
use blockdct_core::{BlockDctError, BlockDctResult, Dimensions, Image, PixelPlane};

/// MSE and PSNR of a reconstruction against its original
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityMetrics {
    pub mse: f64,
    /// In dB; [`PSNR_CEILING`] when the images are identical
    pub psnr: f64,
}

impl QualityMetrics {
    pub fn from_mse(mse: f64) -> Self {
        Self {
            mse,
            psnr: psnr_from_mse(mse),
        }
    }

    pub fn rating(&self) -> QualityRating {
        QualityRating::from_psnr(self.psnr)
    }
}

/// Coarse reading of a PSNR value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QualityRating {
    /// Above 40 dB
    Excellent,
    /// 30-40 dB
    Good,
    /// Below 30 dB, visible degradation
    Degraded,
}

impl QualityRating {
    pub fn from_psnr(psnr: f64) -> Self {
        if psnr > 40.0 {
            QualityRating::Excellent
        } else if psnr >= 30.0 {
            QualityRating::Good
        } else {
            QualityRating::Degraded
        }
    }
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QualityRating::Excellent => "excellent",
            QualityRating::Good => "good",
            QualityRating::Degraded => "degraded",
        })
    }
}

/// `20 log10(255 / sqrt(mse))`, or the 100 dB ceiling when `mse` is zero
pub fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        return PSNR_CEILING;
    }
    20.0 * (MAX_SAMPLE / mse.sqrt()).log10()
}

/// Mean squared error between two planes
pub fn plane_mse(original: &PixelPlane, reconstructed: &PixelPlane) -> BlockDctResult<f64> {
    check_dimensions(original.dimensions(), reconstructed.dimensions())?;
    Ok(squared_error(original, reconstructed) / original.dimensions().pixel_count() as f64)
}

/// Mean squared error over every sample of every channel
pub fn mse(original: &Image, reconstructed: &Image) -> BlockDctResult<f64> {
    check_dimensions(original.dimensions(), reconstructed.dimensions())?;
    Ok(image_mse(original, reconstructed))
}

pub fn psnr(original: &Image, reconstructed: &Image) -> BlockDctResult<f64> {
    mse(original, reconstructed).map(psnr_from_mse)
}

/// MSE and PSNR over the whole image
pub fn metrics(original: &Image, reconstructed: &Image) -> BlockDctResult<QualityMetrics> {
    mse(original, reconstructed).map(QualityMetrics::from_mse)
}

/// MSE and PSNR for each channel, in red, green, blue order
pub fn channel_metrics(
    original: &Image,
    reconstructed: &Image,
) -> BlockDctResult<[QualityMetrics; 3]> {
    check_dimensions(original.dimensions(), reconstructed.dimensions())?;
    let [r0, g0, b0] = original.planes();
    let [r1, g1, b1] = reconstructed.planes();
    Ok([
        QualityMetrics::from_mse(plane_mse(r0, r1)?),
        QualityMetrics::from_mse(plane_mse(g0, g1)?),
        QualityMetrics::from_mse(plane_mse(b0, b1)?),
    ])
}

/// Images must already agree in size
pub(crate) fn image_mse(original: &Image, reconstructed: &Image) -> f64 {
    debug_assert_eq!(original.dimensions(), reconstructed.dimensions());
    let total: f64 = original
        .planes()
        .iter()
        .zip(reconstructed.planes())
        .map(|(a, b)| squared_error(a, b))
        .sum();
    total / (original.pixel_count() * original.planes().len()) as f64
}

fn squared_error(a: &PixelPlane, b: &PixelPlane) -> f64 {
    a.samples()
        .iter()
        .zip(b.samples())
        .map(|(&x, &y)| {
            let diff = x as f64 - y as f64;
            diff * diff
        })
        .sum()
}

fn check_dimensions(original: Dimensions, reconstructed: Dimensions) -> BlockDctResult<()> {
    if original != reconstructed {
        return Err(BlockDctError::DimensionMismatch {
            original,
            reconstructed,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, rgb: [u8; 3]) -> Image {
        let data: Vec<u8> = rgb.iter().copied().cycle().take(width * height * 3).collect();
        Image::from_interleaved(width, height, &data).unwrap()
    }

    #[test]
    fn test_identical_images() {
        let image = solid(4, 4, [10, 20, 30]);
        let m = metrics(&image, &image).unwrap();
        assert_eq!(m.mse, 0.0);
        assert_eq!(m.psnr, 100.0);
        assert_eq!(m.rating(), QualityRating::Excellent);
    }

    #[test]
    fn test_known_error() {
        // Only red differs, by 3: mse = 9 / 3 = 3
        let a = solid(4, 4, [10, 20, 30]);
        let b = solid(4, 4, [13, 20, 30]);
        let m = metrics(&a, &b).unwrap();
        assert!((m.mse - 3.0).abs() < 1e-12);
        let expected = 20.0 * (255.0 / 3.0f64.sqrt()).log10();
        assert!((m.psnr - expected).abs() < 1e-9);

        let per_channel = channel_metrics(&a, &b).unwrap();
        assert!((per_channel[0].mse - 9.0).abs() < 1e-12);
        assert_eq!(per_channel[1].psnr, 100.0);
        assert_eq!(per_channel[2].mse, 0.0);
    }

    #[test]
    fn test_psnr_from_mse() {
        assert_eq!(psnr_from_mse(0.0), 100.0);
        assert!((psnr_from_mse(255.0 * 255.0) - 0.0).abs() < 1e-12);
        // 10 log10(255^2 / mse) agrees with 20 log10(255 / sqrt(mse))
        let mse = 42.5;
        assert!((psnr_from_mse(mse) - 10.0 * (255.0f64 * 255.0 / mse).log10()).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = solid(4, 4, [0, 0, 0]);
        let b = solid(4, 5, [0, 0, 0]);
        assert!(matches!(
            mse(&a, &b),
            Err(BlockDctError::DimensionMismatch { .. })
        ));
        assert!(psnr(&a, &b).is_err());
        assert!(plane_mse(&a.planes()[0], &b.planes()[0]).is_err());
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(QualityRating::from_psnr(45.0), QualityRating::Excellent);
        assert_eq!(QualityRating::from_psnr(40.0), QualityRating::Good);
        assert_eq!(QualityRating::from_psnr(30.0), QualityRating::Good);
        assert_eq!(QualityRating::from_psnr(29.9), QualityRating::Degraded);
    }
}
