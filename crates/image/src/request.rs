//! Transform inputs and validation.

use crate::color::{Color, DEFAULT_TOLERANCE};
use crate::format::{OutputFormat, SourceKind};
use crate::{ImageError, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use std::num::NonZeroU32;

/// Default JPEG quality (0-100).
pub const DEFAULT_QUALITY: u8 = 80;

/// Caller-side options, as collected from the form or settings.
///
/// Width and height are optional here because the form may be incomplete;
/// [`TransformRequest::new`] rejects anything not strictly positive.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Target width in pixels
    pub width: Option<u32>,
    /// Target height in pixels
    pub height: Option<u32>,
    /// Output format
    pub format: OutputFormat,
    /// JPEG quality (0-100), ignored for PNG
    pub quality: u8,
    /// Crop a solid border before resizing
    pub auto_crop: bool,
    /// Crop key, fill color and transparency key
    pub background: Color,
    /// Per-channel tolerance for the crop key and transparency key
    pub tolerance: u8,
    /// Resampling filter
    pub filter: FilterType,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            format: OutputFormat::Jpeg,
            quality: DEFAULT_QUALITY,
            auto_crop: false,
            background: Color::WHITE,
            tolerance: DEFAULT_TOLERANCE,
            filter: FilterType::Triangle,
        }
    }
}

impl TransformOptions {
    /// Options targeting exact dimensions, everything else default.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Validates the target dimensions.
    pub fn dimensions(&self) -> Result<(NonZeroU32, NonZeroU32)> {
        let invalid = || ImageError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        let width = self.width.and_then(NonZeroU32::new).ok_or_else(invalid)?;
        let height = self.height.and_then(NonZeroU32::new).ok_or_else(invalid)?;
        Ok((width, height))
    }
}

/// A validated, immutable transform request.
#[derive(Debug, Clone)]
pub struct TransformRequest<'a> {
    pub(crate) source: &'a RgbaImage,
    pub(crate) source_kind: SourceKind,
    pub(crate) target_width: NonZeroU32,
    pub(crate) target_height: NonZeroU32,
    pub(crate) format: OutputFormat,
    pub(crate) quality: u8,
    pub(crate) auto_crop: bool,
    pub(crate) background: Color,
    pub(crate) tolerance: u8,
    pub(crate) filter: FilterType,
}

impl<'a> TransformRequest<'a> {
    /// Builds a request, failing fast on missing or non-positive dimensions.
    pub fn new(
        source: &'a RgbaImage,
        source_kind: SourceKind,
        options: &TransformOptions,
    ) -> Result<Self> {
        let (target_width, target_height) = options.dimensions()?;

        Ok(Self {
            source,
            source_kind,
            target_width,
            target_height,
            format: options.format,
            quality: options.quality.min(100),
            auto_crop: options.auto_crop,
            background: options.background,
            tolerance: options.tolerance,
            filter: options.filter,
        })
    }

    /// The source buffer.
    pub fn source(&self) -> &RgbaImage {
        self.source
    }

    /// The source format tag.
    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    /// Target dimensions.
    pub fn target_dimensions(&self) -> (u32, u32) {
        (self.target_width.get(), self.target_height.get())
    }

    /// Output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Clamped quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Whether the source border is auto-cropped.
    pub fn auto_crop(&self) -> bool {
        self.auto_crop
    }

    /// Fill with the background before drawing: transparent source into an opaque file.
    pub fn needs_background_fill(&self) -> bool {
        self.source_kind.is_alpha_bearing() && !self.format.is_alpha_bearing()
    }

    /// Key out the background after drawing: opaque source into an alpha file.
    pub fn needs_color_key(&self) -> bool {
        !self.source_kind.is_alpha_bearing() && self.format.is_alpha_bearing()
    }
}
