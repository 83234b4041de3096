//! Image container glue backed by the `image` crate
//!
//! Decoding failures are returned as
//! [`BlockDctError::Decode`](blockdct_core::BlockDctError::Decode) carrying the
//! decoder's own error.

use std::fs;
use std::path::Path;

use blockdct_core::{BlockDctResult, Image};
use blockdct_transform::validate_quality;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use tracing::debug;

/// Decode an image file of any supported container into RGB planes
pub fn load_image<P: AsRef<Path>>(path: P) -> BlockDctResult<Image> {
    let path = path.as_ref();
    let decoded = image::open(path)?;
    debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        "decoded image"
    );
    to_image(decoded)
}

/// Decode an in-memory container into RGB planes
pub fn decode_image(bytes: &[u8]) -> BlockDctResult<Image> {
    let decoded = image::load_from_memory(bytes)?;
    debug!(
        bytes = bytes.len(),
        width = decoded.width(),
        height = decoded.height(),
        "decoded image"
    );
    to_image(decoded)
}

/// Encode as baseline JPEG at `quality` (1-100)
pub fn encode_jpeg(image: &Image, quality: u32) -> BlockDctResult<Vec<u8>> {
    validate_quality(quality)?;
    let rgb = RgbImage::try_from(image)?;
    let mut buffer = Vec::new();
    // validated above, fits in u8
    JpegEncoder::new_with_quality(&mut buffer, quality as u8).encode_image(&rgb)?;
    Ok(buffer)
}

/// Write an image, choosing the container from the file extension. JPEG output
/// uses `jpeg_quality`.
pub fn save_image<P: AsRef<Path>>(image: &Image, path: P, jpeg_quality: u32) -> BlockDctResult<()> {
    let path = path.as_ref();
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    if is_jpeg {
        fs::write(path, encode_jpeg(image, jpeg_quality)?)?;
    } else {
        RgbImage::try_from(image)?.save(path)?;
    }
    debug!(path = %path.display(), "saved image");
    Ok(())
}

fn to_image(decoded: DynamicImage) -> BlockDctResult<Image> {
    Image::try_from(&decoded.to_rgb8())
}
