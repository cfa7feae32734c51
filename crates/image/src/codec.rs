//! Decoding and encoding through the image crate.

use crate::format::{detect_format, ImageFormat, OutputFormat, SourceKind};
use crate::metadata::ImageMetadata;
use crate::{ImageError, Result};
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// A decoded source image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Pixels as RGBA8
    pub buffer: RgbaImage,
    /// Detected input format
    pub format: ImageFormat,
    /// Size of the encoded input
    pub size_bytes: usize,
}

impl DecodedImage {
    /// Pipeline tag for the input format.
    pub fn source_kind(&self) -> SourceKind {
        self.format.source_kind()
    }

    /// Natural width.
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Natural height.
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Dimensions, format and size.
    pub fn metadata(&self) -> ImageMetadata {
        ImageMetadata {
            width: self.width(),
            height: self.height(),
            format: self.format,
            size_bytes: self.size_bytes,
        }
    }
}

/// Decode image file data into an RGBA buffer.
///
/// Data that is not a recognised image, or a recognised format with no
/// decoder (AVIF, HEIC), fails with [`ImageError::InvalidInput`] before any
/// decoding is attempted.
pub fn decode(data: &[u8]) -> Result<DecodedImage> {
    let format = detect_format(data)?;
    let codec = format.codec().ok_or_else(|| {
        ImageError::InvalidInput(format!("{} files are not supported", format.mime_type()))
    })?;
    let img = image::load_from_memory_with_format(data, codec)?;

    Ok(DecodedImage {
        buffer: img.to_rgba8(),
        format,
        size_bytes: data.len(),
    })
}

/// Encode an RGBA buffer.
///
/// JPEG drops the alpha channel; quality is clamped to 1-100 and ignored for PNG.
pub fn encode(buffer: &RgbaImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(buffer.clone()).to_rgb8();
            let quality = quality.clamp(1, 100);
            DynamicImage::ImageRgb8(rgb).write_to(&mut out, ImageOutputFormat::Jpeg(quality))?;
        }
        OutputFormat::Png => {
            DynamicImage::ImageRgba8(buffer.clone()).write_to(&mut out, ImageOutputFormat::Png)?;
        }
    }

    Ok(out.into_inner())
}
