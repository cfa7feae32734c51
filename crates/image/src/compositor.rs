//! Crop, resample, and format-conversion compositing.

use crate::bounds::{scan, Rect, ScanMode};
use crate::color::{Color, ColorMatcher};
use crate::format::OutputFormat;
use crate::request::TransformRequest;
use crate::transparency::rewrite;
use crate::{ImageError, Result};
use image::imageops::FilterType;
use image::{imageops, GenericImage, Rgba, Rgba32FImage, RgbaImage};

/// Output of [`compose`], ready for encoding.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Destination buffer, exactly the requested size
    pub image: RgbaImage,
    /// Source region that was drawn
    pub crop: Rect,
    /// Format the buffer is meant to be encoded as
    pub format: OutputFormat,
    /// Encoder quality
    pub quality: u8,
    /// Per-step summary
    pub stats: ComposeStats,
}

/// What the compositor did, for logging and display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// An auto-crop scan ran but found no content
    pub crop_fell_back: bool,
    /// The destination was pre-filled with the background
    pub filled_background: bool,
    /// Pixels made transparent by color keying
    pub keyed_pixels: usize,
}

/// Runs the full transform for a validated request.
///
/// Steps, in order: pick the crop region, allocate the destination, fill it
/// with the background when a transparent source goes into an opaque format,
/// resample the region onto it, then key out the background when an opaque
/// source goes into an alpha-bearing format.
pub fn compose(request: &TransformRequest<'_>) -> Result<TransformResult> {
    let source = request.source;
    let (source_width, source_height) = source.dimensions();
    if source_width == 0 || source_height == 0 {
        return Err(ImageError::Processing("Source image has no pixels".into()));
    }

    let mut stats = ComposeStats::default();

    let crop = if request.auto_crop {
        let found = scan(source, scan_mode(request));
        stats.crop_fell_back = found.is_none();
        found.unwrap_or_else(|| Rect::full(source_width, source_height))
    } else {
        Rect::full(source_width, source_height)
    };
    tracing::debug!(?crop, fell_back = stats.crop_fell_back, "Crop region selected");

    let (width, height) = request.target_dimensions();
    let mut dest = allocate(width, height)?;

    if request.needs_background_fill() {
        fill(&mut dest, request.background);
        stats.filled_background = true;
    }

    let region =
        imageops::crop_imm(source, crop.left, crop.top, crop.width, crop.height).to_image();
    let resampled = if (crop.width, crop.height) == (width, height) {
        region
    } else {
        resample_premultiplied(&region, width, height, request.filter)
    };

    if stats.filled_background {
        draw_over_opaque(&mut dest, &resampled);
    } else {
        dest.copy_from(&resampled, 0, 0).map_err(|e| {
            ImageError::Processing(format!("Failed to draw resampled region: {e}"))
        })?;
    }

    if request.needs_color_key() {
        let matcher = ColorMatcher::new(request.background, request.tolerance);
        stats.keyed_pixels = rewrite(&mut dest, matcher);
        tracing::debug!(
            keyed = stats.keyed_pixels,
            key = %request.background,
            "Background keyed out"
        );
    }

    Ok(TransformResult {
        image: dest,
        crop,
        format: request.format,
        quality: request.quality,
        stats,
    })
}

fn scan_mode(request: &TransformRequest<'_>) -> ScanMode {
    if request.source_kind.is_alpha_bearing() {
        ScanMode::Alpha
    } else {
        ScanMode::ColorKey(ColorMatcher::new(request.background, request.tolerance))
    }
}

/// Allocates a zeroed buffer, reporting overflow or allocation failure
/// instead of aborting.
fn allocate(width: u32, height: u32) -> Result<RgbaImage> {
    let too_large = || ImageError::Processing(format!("Cannot allocate a {width}x{height} canvas"));
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .filter(|&n| n > 0)
        .ok_or_else(too_large)?;

    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        ImageError::Processing(format!("Cannot allocate a {width}x{height} canvas: {e}"))
    })?;
    data.resize(len, 0);

    RgbaImage::from_raw(width, height, data).ok_or_else(too_large)
}

/// Resizes with color channels premultiplied by alpha, so fully transparent
/// neighbours don't pull edge colors toward black.
fn resample_premultiplied(
    region: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(region.width(), region.height(), |x, y| {
        let Rgba([r, g, b, a]) = *region.get_pixel(x, y);
        let alpha = a as f32 / 255.0;
        let channel = |c: u8| c as f32 / 255.0 * alpha;
        Rgba([channel(r), channel(g), channel(b), alpha])
    });

    let resized = imageops::resize(&premultiplied, width, height, filter);

    RgbaImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *resized.get_pixel(x, y);
        let alpha = a.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |c: f32| ((c / alpha).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([channel(r), channel(g), channel(b), (alpha * 255.0).round() as u8])
    })
}

fn fill(dest: &mut RgbaImage, color: Color) {
    let pixel = color.to_rgba();
    for p in dest.pixels_mut() {
        *p = pixel;
    }
}

/// Source-over onto an opaque destination of the same size.
fn draw_over_opaque(dest: &mut RgbaImage, top: &RgbaImage) {
    for (bottom, src) in dest.pixels_mut().zip(top.pixels()) {
        let Rgba([r, g, b, a]) = *src;
        let alpha = a as u32;
        let inv_alpha = 255 - alpha;
        let mix = |fg: u8, bg: u8| ((fg as u32 * alpha + bg as u32 * inv_alpha + 127) / 255) as u8;

        *bottom = Rgba([mix(r, bottom[0]), mix(g, bottom[1]), mix(b, bottom[2]), 255]);
    }
}
