//! Core types and utilities for the block DCT codec
//!
//! This crate provides the fundamental data structures shared by the codec
//! crates: pixel planes, three-channel images, dimensions, and the error type.

pub mod consts;
pub mod error;
pub mod image;
pub mod types;

pub use error::{BlockDctError, BlockDctResult};
pub use crate::image::*;
pub use types::*;
