//! Block tiling for pixel planes
//!
//! Planes are walked in square blocks anchored every `size` samples, row-major
//! (left to right, then top to bottom). Blocks that hang over the bottom or
//! right edge use edge-clamped addressing: indices past the plane resolve to the
//! last valid row/column, so every block is a full `size x size` window.
//!
//! Insertion uses the same clamped addressing. Positions that clamp onto the
//! same destination sample are written in row-major order within the block, so
//! the sample ends up holding the block entry with the largest row/column index.
//! Aliasing never crosses block rows: clamping only happens in the last anchor
//! row/column, which already owns the last plane row/column.

use blockdct_core::consts::MAX_SAMPLE;
use blockdct_core::{BlockDctError, BlockDctResult, Dimensions, PixelPlane};

use crate::validate_block_size;

/// A square block of real-valued samples, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    size: usize,
    data: Vec<f64>,
}

impl Block {
    /// Zero-filled block
    pub fn zeros(size: usize) -> BlockDctResult<Self> {
        validate_block_size(size)?;
        Ok(Self::zeroed(size))
    }

    /// `size` must already be validated
    pub(crate) fn zeroed(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Wrap `size * size` row-major values
    pub fn from_vec(size: usize, data: Vec<f64>) -> BlockDctResult<Self> {
        validate_block_size(size)?;
        let expected = size * size;
        if data.len() != expected {
            return Err(BlockDctError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// Read a block anchored at (row, col) with edge-clamped addressing
    pub fn extract(
        plane: &PixelPlane,
        row: usize,
        col: usize,
        size: usize,
    ) -> BlockDctResult<Self> {
        let mut block = Self::zeros(size)?;
        for i in 0..size {
            for j in 0..size {
                block.data[i * size + j] = plane.get_clamped(row + i, col + j) as f64;
            }
        }
        Ok(block)
    }

    /// Write this block back at (row, col) with edge-clamped addressing,
    /// rounding and clipping each value to [0, 255]
    pub fn insert(&self, plane: &mut PixelPlane, row: usize, col: usize) {
        let mut band = BandMut::whole(plane);
        self.insert_into(&mut band, row, col);
    }

    /// Write this block into a band of plane rows. The clamped destination
    /// rows must lie inside the band.
    pub fn insert_into(&self, band: &mut BandMut<'_>, row: usize, col: usize) {
        let n = self.size;
        for i in 0..n {
            let dest_row = (row + i).min(band.plane_height - 1);
            for j in 0..n {
                let dest_col = (col + j).min(band.width - 1);
                band.set(dest_row, dest_col, to_sample(self.data[i * n + j]));
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.size + j] = value;
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Add `delta` to every sample
    pub fn level_shift(&mut self, delta: f64) {
        for v in &mut self.data {
            *v += delta;
        }
    }

    /// Clip every sample to [0, 255]
    pub fn clip(&mut self) {
        for v in &mut self.data {
            *v = v.clamp(0.0, MAX_SAMPLE);
        }
    }

    /// Swap rows and columns in place
    pub fn transpose(&mut self) {
        let n = self.size;
        for i in 0..n {
            for j in (i + 1)..n {
                self.data.swap(i * n + j, j * n + i);
            }
        }
    }

    /// Largest absolute difference to another block of the same size
    pub fn max_abs_diff(&self, other: &Block) -> f64 {
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

#[inline]
fn to_sample(value: f64) -> u8 {
    value.clamp(0.0, MAX_SAMPLE).round() as u8
}

/// Mutable view of a run of whole rows of a plane
pub struct BandMut<'a> {
    rows: &'a mut [u8],
    width: usize,
    top: usize,
    plane_height: usize,
}

impl<'a> BandMut<'a> {
    /// View over rows `top..top + rows.len() / width` of a plane that is
    /// `plane_height` rows tall
    pub fn new(rows: &'a mut [u8], width: usize, top: usize, plane_height: usize) -> Self {
        debug_assert_eq!(rows.len() % width, 0);
        debug_assert!(top + rows.len() / width <= plane_height);
        Self {
            rows,
            width,
            top,
            plane_height,
        }
    }

    /// View over a whole plane
    pub fn whole(plane: &'a mut PixelPlane) -> Self {
        let Dimensions { width, height } = plane.dimensions();
        Self::new(plane.samples_mut(), width, 0, height)
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn height(&self) -> usize {
        self.rows.len() / self.width
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: u8) {
        debug_assert!(row >= self.top && row < self.top + self.height());
        self.rows[(row - self.top) * self.width + col] = value;
    }
}

/// Number of block anchors along an axis of `len` samples
pub fn blocks_across(len: usize, size: usize) -> usize {
    len.div_ceil(size)
}

/// Block anchors (row, col) covering a plane, in row-major order
pub fn block_anchors(dims: Dimensions, size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..dims.height)
        .step_by(size)
        .flat_map(move |row| (0..dims.width).step_by(size).map(move |col| (row, col)))
}
