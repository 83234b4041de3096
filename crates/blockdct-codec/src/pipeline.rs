//! Channel and image compression pipelines

use std::borrow::Cow;

use blockdct_core::consts::LEVEL_SHIFT;
use blockdct_core::{BlockDctResult, Channel, Dimensions, Image, PixelPlane};
use blockdct_transform::{block_anchors, BandMut, Block, Dct2d, QuantMatrix};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::metrics::{self, QualityMetrics};
use crate::CompressOptions;

/// Compress and reconstruct one plane, tiling blocks sequentially in
/// row-major order
pub fn compress_channel(
    plane: &PixelPlane,
    quality: u32,
    block_size: usize,
) -> BlockDctResult<PixelPlane> {
    Compressor::new(
        CompressOptions::new()
            .quality(quality)
            .block_size(block_size)
            .parallel(false),
    )
    .compress_channel(plane)
}

/// Compress and reconstruct every channel of an image
pub fn compress(image: &Image, quality: u32, block_size: usize) -> BlockDctResult<Compression> {
    Compressor::new(CompressOptions::new().quality(quality).block_size(block_size)).compress(image)
}

/// Source image together with its lossy reconstruction. Only built by
/// [`Compressor::compress`], so both images always share their dimensions.
#[derive(Debug, Clone)]
pub struct Compression {
    original: Image,
    reconstructed: Image,
}

impl Compression {
    pub fn original(&self) -> &Image {
        &self.original
    }

    pub fn reconstructed(&self) -> &Image {
        &self.reconstructed
    }

    /// MSE and PSNR of the reconstruction
    pub fn metrics(&self) -> QualityMetrics {
        QualityMetrics::from_mse(metrics::image_mse(&self.original, &self.reconstructed))
    }

    /// `(original, reconstructed)`
    pub fn into_parts(self) -> (Image, Image) {
        (self.original, self.reconstructed)
    }
}

/// Stateless compressor; options are validated on every call
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    options: CompressOptions,
}

impl Compressor {
    pub fn new(options: CompressOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompressOptions {
        &self.options
    }

    pub fn compress_channel(&self, plane: &PixelPlane) -> BlockDctResult<PixelPlane> {
        let kernel = BlockKernel::new(&self.options)?;
        debug!(
            quality = self.options.quality,
            block_size = self.options.block_size,
            dimensions = %plane.dimensions(),
            "compressing channel"
        );
        kernel.compress_plane(plane, self.options.parallel)
    }

    pub fn compress(&self, image: &Image) -> BlockDctResult<Compression> {
        let kernel = BlockKernel::new(&self.options)?;
        let parallel = self.options.parallel;
        debug!(
            quality = self.options.quality,
            block_size = self.options.block_size,
            dimensions = %image.dimensions(),
            parallel,
            "compressing image"
        );

        let channel = |c: Channel| {
            trace!(channel = %c, "compressing channel");
            kernel.compress_plane(image.plane(c), parallel)
        };

        let (red, (green, blue)) = if parallel {
            rayon::join(
                || channel(Channel::Red),
                || rayon::join(|| channel(Channel::Green), || channel(Channel::Blue)),
            )
        } else {
            (
                channel(Channel::Red),
                (channel(Channel::Green), channel(Channel::Blue)),
            )
        };

        Ok(Compression {
            original: image.clone(),
            reconstructed: Image::from_planes(red?, green?, blue?)?,
        })
    }
}

/// Per-call state shared by every block of every channel
struct BlockKernel {
    block_size: usize,
    quant: QuantMatrix,
    dct: Cow<'static, Dct2d>,
}

impl BlockKernel {
    fn new(options: &CompressOptions) -> BlockDctResult<Self> {
        options.validate()?;
        Ok(Self {
            block_size: options.block_size,
            quant: QuantMatrix::generate(options.quality, options.block_size)?,
            dct: Dct2d::shared(options.block_size)?,
        })
    }

    /// Extract, shift, transform, quantize, invert and clip one block
    fn process_block(&self, plane: &PixelPlane, row: usize, col: usize) -> BlockDctResult<Block> {
        let mut block = Block::extract(plane, row, col, self.block_size)?;
        block.level_shift(-LEVEL_SHIFT);

        let mut coeffs = self.dct.forward(&block)?;
        self.quant.quantize_block(&mut coeffs)?;

        let mut restored = self.dct.inverse(&coeffs)?;
        restored.level_shift(LEVEL_SHIFT);
        restored.clip();
        Ok(restored)
    }

    fn compress_plane(&self, plane: &PixelPlane, parallel: bool) -> BlockDctResult<PixelPlane> {
        let mut output = plane.clone();
        if parallel {
            self.compress_bands(plane, &mut output)?;
        } else {
            for (row, col) in block_anchors(plane.dimensions(), self.block_size) {
                self.process_block(plane, row, col)?
                    .insert(&mut output, row, col);
            }
        }
        Ok(output)
    }

    /// Parallel tiling: each worker owns one band of `block_size` output rows,
    /// which receives exactly the writes of one anchor row. Within a band,
    /// blocks are still inserted left to right, so clamped writes resolve as
    /// in the sequential scan.
    fn compress_bands(&self, plane: &PixelPlane, output: &mut PixelPlane) -> BlockDctResult<()> {
        let Dimensions { width, height } = plane.dimensions();
        let size = self.block_size;
        let band_len = size.saturating_mul(width);

        output
            .samples_mut()
            .par_chunks_mut(band_len)
            .enumerate()
            .try_for_each(|(band_index, rows)| {
                let top = band_index * size;
                let mut band = BandMut::new(rows, width, top, height);
                for col in (0..width).step_by(size) {
                    self.process_block(plane, top, col)?
                        .insert_into(&mut band, top, col);
                }
                Ok(())
            })
    }
}
