//! Derived form state: linked dimensions, option visibility, output names.
//!
//! These are the computations the browser form performs on input events,
//! expressed as pure functions so any front end can call them.

use crate::format::{OutputFormat, SourceKind};

/// Height that keeps `aspect_ratio` (width / height) for a new width.
///
/// Returns `None` when the width is not positive, which clears the linked
/// field. Never returns zero for a positive width.
///
/// # Example
/// ```
/// use resizer_image::form::linked_height;
///
/// assert_eq!(linked_height(800, 4.0 / 3.0), Some(600));
/// assert_eq!(linked_height(0, 4.0 / 3.0), None);
/// ```
pub fn linked_height(width: i64, aspect_ratio: f64) -> Option<u32> {
    if width <= 0 || !is_usable_ratio(aspect_ratio) {
        return None;
    }
    Some(clamp_dimension(width as f64 / aspect_ratio))
}

/// Width that keeps `aspect_ratio` (width / height) for a new height.
///
/// # Example
/// ```
/// use resizer_image::form::linked_width;
///
/// assert_eq!(linked_width(600, 4.0 / 3.0), Some(800));
/// assert_eq!(linked_width(-5, 4.0 / 3.0), None);
/// ```
pub fn linked_width(height: i64, aspect_ratio: f64) -> Option<u32> {
    if height <= 0 || !is_usable_ratio(aspect_ratio) {
        return None;
    }
    Some(clamp_dimension(height as f64 * aspect_ratio))
}

fn is_usable_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

fn clamp_dimension(value: f64) -> u32 {
    value.round().clamp(1.0, u32::MAX as f64) as u32
}

/// Whether the quality slider applies to `format`.
pub fn shows_quality(format: OutputFormat) -> bool {
    format.uses_quality()
}

/// Whether the background color option affects the result.
///
/// It does when auto-crop is on (crop key), or when the conversion fills a
/// transparent source or keys an opaque one. With no image loaded only the
/// crop flag counts.
pub fn shows_background_option(
    source: Option<SourceKind>,
    format: OutputFormat,
    auto_crop: bool,
) -> bool {
    if auto_crop {
        return true;
    }
    match source {
        Some(kind) => kind.is_alpha_bearing() != format.is_alpha_bearing(),
        None => false,
    }
}

/// Original file name without its last extension.
///
/// Names without a dot are returned whole.
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Download name: the trimmed custom name, or the original stem, plus the
/// format extension.
///
/// # Example
/// ```
/// use resizer_image::{form::output_file_name, OutputFormat};
///
/// let name = output_file_name("  ", "holiday.photo.png", OutputFormat::Jpeg);
/// assert_eq!(name, "holiday.photo.jpg");
/// assert_eq!(output_file_name("thumb", "holiday.png", OutputFormat::Png), "thumb.png");
/// ```
pub fn output_file_name(custom: &str, original_file_name: &str, format: OutputFormat) -> String {
    let custom = custom.trim();
    let stem = if custom.is_empty() { file_stem(original_file_name) } else { custom };
    format!("{stem}{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_dimensions_round() {
        assert_eq!(linked_height(1000, 1.6), Some(625));
        assert_eq!(linked_width(625, 1.6), Some(1000));
        assert_eq!(linked_height(333, 1.0 / 3.0), Some(999));
    }

    #[test]
    fn test_linked_dimensions_never_zero() {
        assert_eq!(linked_height(1, 10.0), Some(1));
        assert_eq!(linked_width(1, 0.01), Some(1));
    }

    #[test]
    fn test_linked_dimensions_bad_ratio() {
        assert_eq!(linked_height(100, 0.0), None);
        assert_eq!(linked_height(100, f64::NAN), None);
        assert_eq!(linked_width(100, f64::INFINITY), None);
    }

    #[test]
    fn test_quality_visibility() {
        assert!(shows_quality(OutputFormat::Jpeg));
        assert!(!shows_quality(OutputFormat::Png));
    }

    #[test]
    fn test_background_option_visibility() {
        assert!(shows_background_option(None, OutputFormat::Jpeg, true));
        assert!(!shows_background_option(None, OutputFormat::Png, false));
        assert!(shows_background_option(Some(SourceKind::AlphaBearing), OutputFormat::Jpeg, false));
        assert!(shows_background_option(Some(SourceKind::OpaqueLossy), OutputFormat::Png, false));
        assert!(!shows_background_option(Some(SourceKind::OpaqueLossy), OutputFormat::Jpeg, false));
        assert!(!shows_background_option(Some(SourceKind::AlphaBearing), OutputFormat::Png, false));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("photo.jpeg"), "photo");
        assert_eq!(file_stem("archive.tar.png"), "archive.tar");
        assert_eq!(file_stem("README"), "README");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("", "cat.webp", OutputFormat::Png), "cat.png");
        assert_eq!(output_file_name(" banner ", "cat.webp", OutputFormat::Jpeg), "banner.jpg");
    }
}
