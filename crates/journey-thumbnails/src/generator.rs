use std::io::Cursor;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use tracing::debug;

pub const PREVIEW_LONGEST_EDGE: u32 = 512;

/// Decode any supported image and produce a small JPEG preview.
pub fn generate_preview(bytes: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes).context("decode image for preview")?;
    let thumb = img.resize(
        PREVIEW_LONGEST_EDGE,
        PREVIEW_LONGEST_EDGE,
        FilterType::Lanczos3,
    );

    let mut jpeg_bytes = Vec::new();
    image::DynamicImage::ImageRgb8(thumb.to_rgb8())
        .write_to(&mut Cursor::new(&mut jpeg_bytes), image::ImageFormat::Jpeg)
        .context("encode preview as JPEG")?;

    debug!(
        size = jpeg_bytes.len(),
        width = thumb.width(),
        height = thumb.height(),
        "generated preview"
    );

    Ok(jpeg_bytes)
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn large_png_previews_as_small_jpeg() {
        let img = RgbaImage::from_pixel(1024, 256, Rgba([10, 20, 30, 255]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let preview = generate_preview(&png).unwrap();
        assert_eq!(image::guess_format(&preview).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&preview).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (512, 128));
    }

    #[test]
    fn undecodable_bytes_fail() {
        assert!(generate_preview(b"nope").is_err());
    }
}
