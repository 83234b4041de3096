//! Separable orthonormal DCT for square blocks
//!
//! The 2D transform is computed as a 1D transform over every row, a
//! transpose, a second row pass (over the original columns), and a transpose
//! back. The basis is scaled so the transform is orthonormal: energy is
//! preserved and the inverse (DCT-III) is the transpose of the forward
//! (DCT-II) basis.

use std::borrow::Cow;
use std::f64::consts::PI;

use blockdct_core::consts::STANDARD_BLOCK_SIZE;
use blockdct_core::{BlockDctError, BlockDctResult};

use crate::{validate_block_size, Block};

lazy_static::lazy_static! {
    static ref STANDARD_DCT: Dct2d = Dct2d::build(STANDARD_BLOCK_SIZE);
}

/// Precomputed DCT basis for one block size
#[derive(Debug, Clone)]
pub struct Dct2d {
    size: usize,
    /// `basis[u * size + x] = c(u) * cos((2x + 1) u pi / 2size)`
    basis: Vec<f64>,
}

impl Dct2d {
    pub fn new(size: usize) -> BlockDctResult<Self> {
        validate_block_size(size)?;
        Ok(Self::build(size))
    }

    /// Shared basis for the standard 8x8 size, a fresh one otherwise
    pub fn shared(size: usize) -> BlockDctResult<Cow<'static, Dct2d>> {
        if size == STANDARD_BLOCK_SIZE {
            Ok(Cow::Borrowed(&*STANDARD_DCT))
        } else {
            Self::new(size).map(Cow::Owned)
        }
    }

    fn build(size: usize) -> Self {
        let n = size as f64;
        let dc_scale = (1.0 / n).sqrt();
        let ac_scale = (2.0 / n).sqrt();

        let mut basis = vec![0.0; size * size];
        for u in 0..size {
            let scale = if u == 0 { dc_scale } else { ac_scale };
            for x in 0..size {
                let angle = ((2 * x + 1) as f64 * u as f64 * PI) / (2.0 * n);
                basis[u * size + x] = scale * angle.cos();
            }
        }

        Self { size, basis }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward 2D DCT-II
    pub fn forward(&self, block: &Block) -> BlockDctResult<Block> {
        self.separable(block, Direction::Forward)
    }

    /// Inverse 2D DCT (DCT-III)
    pub fn inverse(&self, coeffs: &Block) -> BlockDctResult<Block> {
        self.separable(coeffs, Direction::Inverse)
    }

    fn separable(&self, input: &Block, direction: Direction) -> BlockDctResult<Block> {
        if input.size() != self.size {
            return Err(BlockDctError::BlockSizeMismatch {
                expected: self.size,
                actual: input.size(),
            });
        }

        let mut temp = self.rows(input, direction);
        temp.transpose();
        let mut output = self.rows(&temp, direction);
        output.transpose();
        Ok(output)
    }

    /// Apply the 1D transform to every row
    fn rows(&self, input: &Block, direction: Direction) -> Block {
        let n = self.size;
        let mut output = Block::zeroed(n);
        let src = input.values();
        let dst = output.values_mut();

        for r in 0..n {
            let row = &src[r * n..(r + 1) * n];
            let out = &mut dst[r * n..(r + 1) * n];
            match direction {
                Direction::Forward => self.dct_1d_forward(row, out),
                Direction::Inverse => self.dct_1d_inverse(row, out),
            }
        }

        output
    }

    /// 1D DCT-II on `size` samples
    #[inline]
    fn dct_1d_forward(&self, input: &[f64], output: &mut [f64]) {
        let n = self.size;
        for (u, out) in output.iter_mut().enumerate() {
            let basis = &self.basis[u * n..(u + 1) * n];
            *out = basis.iter().zip(input).map(|(b, x)| b * x).sum();
        }
    }

    /// 1D DCT-III on `size` coefficients
    #[inline]
    fn dct_1d_inverse(&self, input: &[f64], output: &mut [f64]) {
        let n = self.size;
        for (x, out) in output.iter_mut().enumerate() {
            *out = input
                .iter()
                .enumerate()
                .map(|(u, c)| c * self.basis[u * n + x])
                .sum();
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Inverse,
}
