//! End-to-end processing: decode, validate, compose, encode.

use crate::bounds::Rect;
use crate::codec::{decode, encode};
use crate::compositor::{compose, ComposeStats};
use crate::format::OutputFormat;
use crate::metadata::ImageMetadata;
use crate::request::{TransformOptions, TransformRequest};
use crate::Result;
use tracing::{debug, info, instrument};

/// An encoded output image.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// Encoded file contents
    pub bytes: Vec<u8>,
    /// Encoded format
    pub format: OutputFormat,
    /// Output width
    pub width: u32,
    /// Output height
    pub height: u32,
    /// Source region that was drawn
    pub crop: Rect,
    /// What the compositor did
    pub stats: ComposeStats,
    /// The decoded source
    pub source: ImageMetadata,
}

impl ProcessedImage {
    /// MIME type of `bytes`.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Resize and convert one image file.
///
/// Dimensions are validated before anything is decoded, so a bad request
/// never touches pixels. Each call owns all of its buffers.
///
/// # Example
/// ```
/// use resizer_image::{encode, process_image, OutputFormat, TransformOptions};
/// use image::{Rgba, RgbaImage};
///
/// let source = RgbaImage::from_pixel(40, 20, Rgba([9, 9, 9, 255]));
/// let png = encode(&source, OutputFormat::Png, 80).unwrap();
/// let out = process_image(&png, &TransformOptions::sized(20, 10)).unwrap();
/// assert_eq!((out.width, out.height), (20, 10));
/// assert_eq!(out.mime_type(), "image/jpeg");
/// ```
#[instrument(
    skip_all,
    fields(
        input_bytes = data.len(),
        width = ?options.width,
        height = ?options.height,
        format = %options.format,
    )
)]
pub fn process_image(data: &[u8], options: &TransformOptions) -> Result<ProcessedImage> {
    options.dimensions()?;

    let decoded = decode(data)?;
    let source = decoded.metadata();
    debug!(%source, "Decoded source image");

    let request = TransformRequest::new(&decoded.buffer, decoded.source_kind(), options)?;
    let result = compose(&request)?;
    let bytes = encode(&result.image, result.format, result.quality)?;

    info!(
        crop = ?result.crop,
        output_bytes = bytes.len(),
        filled = result.stats.filled_background,
        keyed = result.stats.keyed_pixels,
        "Image processed"
    );

    Ok(ProcessedImage {
        width: result.image.width(),
        height: result.image.height(),
        bytes,
        format: result.format,
        crop: result.crop,
        stats: result.stats,
        source,
    })
}
