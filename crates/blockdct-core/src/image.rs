//! Image data structures

use crate::{BlockDctError, BlockDctResult, Channel, Dimensions};

/// One channel of one image: 8-bit samples stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelPlane {
    dimensions: Dimensions,
    samples: Vec<u8>,
}

impl PixelPlane {
    /// Create a zero-filled plane
    pub fn new(width: usize, height: usize) -> BlockDctResult<Self> {
        Self::filled(width, height, 0)
    }

    /// Create a plane with every sample set to `value`
    pub fn filled(width: usize, height: usize, value: u8) -> BlockDctResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            dimensions: Dimensions::new(width, height),
            samples: vec![value; width * height],
        })
    }

    /// Wrap an existing row-major sample buffer
    pub fn from_raw(width: usize, height: usize, samples: Vec<u8>) -> BlockDctResult<Self> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if samples.len() != expected {
            return Err(BlockDctError::BufferSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            dimensions: Dimensions::new(width, height),
            samples,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.samples.chunks_exact(self.dimensions.width)
    }

    /// Sample at (row, col). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.samples[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let idx = self.index(row, col);
        self.samples[idx] = value;
    }

    /// Sample at (row, col) with out-of-range indices clamped to the last
    /// valid row and column
    #[inline]
    pub fn get_clamped(&self, row: usize, col: usize) -> u8 {
        let (row, col) = self.clamp(row, col);
        self.get(row, col)
    }

    /// Clamp (row, col) onto the plane
    #[inline]
    pub fn clamp(&self, row: usize, col: usize) -> (usize, usize) {
        (
            row.min(self.dimensions.height - 1),
            col.min(self.dimensions.width - 1),
        )
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.dimensions.height && col < self.dimensions.width);
        row * self.dimensions.width + col
    }
}

fn check_dimensions(width: usize, height: usize) -> BlockDctResult<()> {
    if width == 0 || height == 0 {
        return Err(BlockDctError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// An RGB image held as three independent planes of identical size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    planes: [PixelPlane; 3],
}

impl Image {
    /// Stack three planes into an image. The planes must agree in size.
    pub fn from_planes(
        red: PixelPlane,
        green: PixelPlane,
        blue: PixelPlane,
    ) -> BlockDctResult<Self> {
        let dims = red.dimensions();
        if green.dimensions() != dims || blue.dimensions() != dims {
            return Err(BlockDctError::InconsistentChannelDimensions {
                red: dims,
                green: green.dimensions(),
                blue: blue.dimensions(),
            });
        }

        Ok(Self {
            planes: [red, green, blue],
        })
    }

    /// Split a row-major RGBRGB... buffer into planes
    pub fn from_interleaved(width: usize, height: usize, data: &[u8]) -> BlockDctResult<Self> {
        check_dimensions(width, height)?;
        let pixel_count = width * height;
        let expected = pixel_count * 3;
        if data.len() != expected {
            return Err(BlockDctError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut channels = [
            Vec::with_capacity(pixel_count),
            Vec::with_capacity(pixel_count),
            Vec::with_capacity(pixel_count),
        ];
        for pixel in data.chunks_exact(3) {
            for (channel, &sample) in channels.iter_mut().zip(pixel) {
                channel.push(sample);
            }
        }

        let [r, g, b] = channels;
        Self::from_planes(
            PixelPlane::from_raw(width, height, r)?,
            PixelPlane::from_raw(width, height, g)?,
            PixelPlane::from_raw(width, height, b)?,
        )
    }

    /// Build from three consecutive planes (all red, then green, then blue)
    pub fn from_planar(width: usize, height: usize, data: &[u8]) -> BlockDctResult<Self> {
        check_dimensions(width, height)?;
        let pixel_count = width * height;
        let expected = pixel_count * 3;
        if data.len() != expected {
            return Err(BlockDctError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let plane = |c: usize| {
            let start = c * pixel_count;
            PixelPlane::from_raw(width, height, data[start..start + pixel_count].to_vec())
        };
        Self::from_planes(plane(0)?, plane(1)?, plane(2)?)
    }

    /// Interleave the planes back into a row-major RGBRGB... buffer
    pub fn to_interleaved(&self) -> Vec<u8> {
        let [r, g, b] = &self.planes;
        let mut data = Vec::with_capacity(self.pixel_count() * 3);
        for ((&r, &g), &b) in r.samples().iter().zip(g.samples()).zip(b.samples()) {
            data.extend_from_slice(&[r, g, b]);
        }
        data
    }

    pub fn dimensions(&self) -> Dimensions {
        self.planes[0].dimensions()
    }

    pub fn width(&self) -> usize {
        self.dimensions().width
    }

    pub fn height(&self) -> usize {
        self.dimensions().height
    }

    pub fn pixel_count(&self) -> usize {
        self.dimensions().pixel_count()
    }

    pub fn plane(&self, channel: Channel) -> &PixelPlane {
        &self.planes[channel.index()]
    }

    pub fn planes(&self) -> &[PixelPlane; 3] {
        &self.planes
    }

    pub fn into_planes(self) -> [PixelPlane; 3] {
        self.planes
    }
}

impl TryFrom<&::image::RgbImage> for Image {
    type Error = BlockDctError;

    /// Split a decoded RGB buffer into planes; empty images are rejected
    fn try_from(rgb: &::image::RgbImage) -> BlockDctResult<Self> {
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        Self::from_interleaved(width, height, rgb.as_raw())
    }
}

impl TryFrom<&Image> for ::image::RgbImage {
    type Error = BlockDctError;

    fn try_from(image: &Image) -> BlockDctResult<Self> {
        let (width, height) = rgb_dimensions(image.dimensions())?;
        let data = image.to_interleaved();
        let expected = data.len();
        ::image::RgbImage::from_raw(width, height, data).ok_or(BlockDctError::BufferSizeMismatch {
            expected,
            actual: expected,
        })
    }
}

/// The `image` crate addresses pixels with `u32`; larger planes cannot be
/// handed over
fn rgb_dimensions(dimensions: Dimensions) -> BlockDctResult<(u32, u32)> {
    let Dimensions { width, height } = dimensions;
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(BlockDctError::InvalidDimensions { width, height }),
    }
}
