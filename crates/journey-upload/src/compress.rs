use std::io::Cursor;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

pub const MAX_UPLOAD_WIDTH: u32 = 1920;
pub const JPEG_QUALITY: u8 = 80;

/// Re-encoded upload payload.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
}

/// Shrink to at most `max_width` wide, keeping aspect ratio, and re-encode.
///
/// PNG input stays PNG; everything else becomes JPEG at `quality`.
pub fn compress(bytes: &[u8], max_width: u32, quality: u8) -> Result<CompressedImage> {
    let format = image::guess_format(bytes).context("unrecognised image data")?;
    let img = image::load_from_memory_with_format(bytes, format).context("decode image")?;

    let img = if img.width() > max_width {
        let height = ((img.height() as u64 * max_width as u64) / img.width() as u64).max(1) as u32;
        img.resize_exact(max_width, height, FilterType::Lanczos3)
    } else {
        img
    };

    let mut out = Vec::new();
    let mime = if format == ImageFormat::Png {
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .context("encode PNG")?;
        "image/png"
    } else {
        let encoder = JpegEncoder::new_with_quality(&mut out, quality);
        DynamicImage::ImageRgb8(img.to_rgb8())
            .write_with_encoder(encoder)
            .context("encode JPEG")?;
        "image/jpeg"
    };

    debug!(
        before = bytes.len(),
        after = out.len(),
        width = img.width(),
        height = img.height(),
        "compressed upload"
    );

    Ok(CompressedImage {
        bytes: out,
        width: img.width(),
        height: img.height(),
        mime,
    })
}
