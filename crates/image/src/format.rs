//! Source format detection from magic bytes and output format selection.

use crate::{ImageError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formats recognised on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image
    Gif,
    /// WebP image
    WebP,
    /// AVIF image
    Avif,
    /// BMP image
    Bmp,
    /// TIFF image
    Tiff,
    /// HEIC/HEIF image
    Heic,
}

impl ImageFormat {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Avif => "image/avif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Heic => "image/heic",
        }
    }

    /// How the pipeline treats pixels decoded from this format.
    ///
    /// Only PNG is trusted to carry meaningful alpha. WebP is grouped with
    /// JPEG because photos in either are almost always flattened.
    pub fn source_kind(&self) -> SourceKind {
        match self {
            ImageFormat::Png => SourceKind::AlphaBearing,
            ImageFormat::Jpeg | ImageFormat::WebP => SourceKind::OpaqueLossy,
            _ => SourceKind::OpaqueOther,
        }
    }

    /// Decoder used for this format, or `None` when it is recognised but
    /// cannot be decoded.
    pub fn codec(&self) -> Option<image::ImageFormat> {
        match self {
            ImageFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            ImageFormat::Png => Some(image::ImageFormat::Png),
            ImageFormat::Gif => Some(image::ImageFormat::Gif),
            ImageFormat::WebP => Some(image::ImageFormat::WebP),
            ImageFormat::Bmp => Some(image::ImageFormat::Bmp),
            ImageFormat::Tiff => Some(image::ImageFormat::Tiff),
            ImageFormat::Avif | ImageFormat::Heic => None,
        }
    }
}

/// Source format tag driving crop mode and conversion steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Alpha channel is meaningful
    AlphaBearing,
    /// Lossy and always opaque
    OpaqueLossy,
    /// Any other opaque format
    OpaqueOther,
}

impl SourceKind {
    /// Returns true if the source carries meaningful alpha.
    #[inline]
    pub fn is_alpha_bearing(&self) -> bool {
        matches!(self, SourceKind::AlphaBearing)
    }
}

/// Formats the pipeline can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy, opaque
    #[default]
    Jpeg,
    /// Lossless, alpha-bearing
    Png,
}

impl OutputFormat {
    /// Short format name as stored in settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }

    /// MIME type used for the download.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    /// File extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => ".jpg",
            OutputFormat::Png => ".png",
        }
    }

    /// Returns true if the encoded file can store transparency.
    pub fn is_alpha_bearing(&self) -> bool {
        matches!(self, OutputFormat::Png)
    }

    /// Returns true if the quality setting affects encoding.
    pub fn uses_quality(&self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Ok(OutputFormat::Jpeg),
            "png" | "image/png" => Ok(OutputFormat::Png),
            other => Err(ImageError::InvalidInput(format!(
                "Unsupported output format: {other}"
            ))),
        }
    }
}

/// Leading-byte signatures, checked in order.
const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (b"\xFF\xD8\xFF", ImageFormat::Jpeg),
    (b"\x89PNG\r\n\x1A\n", ImageFormat::Png),
    (b"GIF87a", ImageFormat::Gif),
    (b"GIF89a", ImageFormat::Gif),
    (b"II*\0", ImageFormat::Tiff),
    (b"MM\0*", ImageFormat::Tiff),
    (b"BM", ImageFormat::Bmp),
];

/// Identifies a dropped file by its leading bytes.
///
/// Files the page cannot treat as an image, including empty ones, fail with
/// [`ImageError::InvalidInput`].
///
/// # Example
/// ```
/// use resizer_image::{detect_format, ImageFormat};
///
/// let header = b"\x89PNG\r\n\x1A\n\0\0\0\rIHDR";
/// assert_eq!(detect_format(header).unwrap(), ImageFormat::Png);
/// assert!(detect_format(b"plain text").is_err());
/// ```
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    SIGNATURES
        .iter()
        .find(|(magic, _)| data.starts_with(magic))
        .map(|&(_, format)| format)
        .or_else(|| container_format(data))
        .ok_or_else(|| ImageError::InvalidInput("Please select an image file".into()))
}

/// RIFF (WebP) and ISO-BMFF (AVIF, HEIC) carry their tag past a size field.
fn container_format(data: &[u8]) -> Option<ImageFormat> {
    let (head, tag) = (data.get(..8)?, data.get(8..12)?);
    if head.starts_with(b"RIFF") {
        return (tag == b"WEBP").then_some(ImageFormat::WebP);
    }
    if &head[4..] != b"ftyp" {
        return None;
    }
    match tag {
        b"avif" | b"avis" => Some(ImageFormat::Avif),
        b"heic" | b"heix" | b"mif1" | b"msf1" => Some(ImageFormat::Heic),
        _ => None,
    }
}
