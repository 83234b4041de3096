//! Transform and quantization kernel for the block DCT codec
//!
//! This crate implements the separable orthonormal DCT for square blocks of any
//! size, quality-driven quantization matrices, and edge-clamped block
//! extraction/insertion against pixel planes.

pub mod blocks;
pub mod dct;
pub mod quantization;

pub use blocks::*;
pub use dct::*;
pub use quantization::*;
