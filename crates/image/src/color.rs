//! RGB colors and per-channel tolerance matching.

use crate::{ImageError, Result};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-channel tolerance used by auto-crop and color keying.
pub const DEFAULT_TOLERANCE: u8 = 20;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// White, the default background.
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Black.
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// Creates a new color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a 6-digit hex string, with or without a leading `#`.
    ///
    /// # Example
    /// ```
    /// use resizer_image::Color;
    ///
    /// assert_eq!(Color::parse_hex("#ff8000").unwrap(), Color::new(255, 128, 0));
    /// assert_eq!(Color::parse_hex("FF8000").unwrap(), Color::new(255, 128, 0));
    /// assert!(Color::parse_hex("#fff").is_err());
    /// ```
    pub fn parse_hex(input: &str) -> Result<Self> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ImageError::ColorParse(input.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ImageError::ColorParse(input.to_string()))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parses a hex string, substituting `fallback` when it is malformed.
    pub fn parse_or(input: &str, fallback: Color) -> Self {
        Self::parse_hex(input).unwrap_or_else(|err| {
            tracing::warn!(error = %err, fallback = %fallback, "Falling back to default color");
            fallback
        })
    }

    /// Returns the color as an opaque RGBA pixel.
    #[inline]
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Returns the RGB channels of a pixel, ignoring alpha.
    #[inline]
    pub fn from_pixel(pixel: &Rgba<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Returns true if every channel of `sample` is within `tolerance` of `target`.
///
/// A color always matches itself, for any tolerance.
#[inline]
pub fn matches(sample: Color, target: Color, tolerance: u8) -> bool {
    sample.r.abs_diff(target.r) <= tolerance
        && sample.g.abs_diff(target.g) <= tolerance
        && sample.b.abs_diff(target.b) <= tolerance
}

/// Tolerance matcher against a fixed target color.
///
/// Scanning and erasing deliberately use different comparators: a pixel
/// exactly `tolerance` away from the target counts as background when
/// scanning but is not erased when keying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMatcher {
    target: Color,
    tolerance: u8,
}

impl ColorMatcher {
    /// Creates a matcher with an explicit tolerance.
    pub fn new(target: Color, tolerance: u8) -> Self {
        Self { target, tolerance }
    }

    /// Creates a matcher using [`DEFAULT_TOLERANCE`].
    pub fn with_default_tolerance(target: Color) -> Self {
        Self::new(target, DEFAULT_TOLERANCE)
    }

    /// The key color.
    pub fn target(&self) -> Color {
        self.target
    }

    /// The per-channel tolerance.
    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Inclusive match, see [`matches`].
    #[inline]
    pub fn matches(&self, sample: Color) -> bool {
        matches(sample, self.target, self.tolerance)
    }

    /// Content test for bounds scanning: any channel strictly outside tolerance.
    #[inline]
    pub fn is_content(&self, sample: Color) -> bool {
        !self.matches(sample)
    }

    /// Erase test for color keying: every channel strictly inside tolerance.
    #[inline]
    pub fn is_erasable(&self, sample: Color) -> bool {
        sample.r.abs_diff(self.target.r) < self.tolerance
            && sample.g.abs_diff(self.target.g) < self.tolerance
            && sample.b.abs_diff(self.target.b) < self.tolerance
    }
}
