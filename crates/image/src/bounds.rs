//! Content bounding-box detection for auto-crop.

use crate::color::{Color, ColorMatcher};
use image::RgbaImage;

/// A rectangle in pixel-buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left column (inclusive)
    pub left: u32,
    /// Top row (inclusive)
    pub top: u32,
    /// Width in pixels, at least 1
    pub width: u32,
    /// Height in pixels, at least 1
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self { left, top, width, height }
    }

    /// The whole extent of a `width` × `height` buffer.
    #[inline]
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns true if the rectangle lies inside a `width` × `height` buffer.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width >= 1
            && self.height >= 1
            && self.left.checked_add(self.width).is_some_and(|r| r <= width)
            && self.top.checked_add(self.height).is_some_and(|b| b <= height)
    }

    /// Returns true if this covers the whole `width` × `height` buffer.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

/// How a pixel is classified as content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Content iff alpha is nonzero
    Alpha,
    /// Content iff any channel is outside tolerance of the key color
    ColorKey(ColorMatcher),
}

impl ScanMode {
    /// Color-key mode against `background` with the default tolerance.
    pub fn color_key(background: Color) -> Self {
        ScanMode::ColorKey(ColorMatcher::with_default_tolerance(background))
    }
}

/// Computes the smallest rectangle enclosing every content pixel.
///
/// Visits each pixel exactly once. Returns `None` when nothing qualifies as
/// content; callers then use [`Rect::full`].
pub fn scan(buffer: &RgbaImage, mode: ScanMode) -> Option<Rect> {
    let mut top = u32::MAX;
    let mut left = u32::MAX;
    let mut bottom = 0u32;
    let mut right = 0u32;
    let mut found = false;

    for (x, y, pixel) in buffer.enumerate_pixels() {
        let is_content = match mode {
            ScanMode::Alpha => pixel[3] > 0,
            ScanMode::ColorKey(matcher) => matcher.is_content(Color::from_pixel(pixel)),
        };

        if is_content {
            found = true;
            top = top.min(y);
            bottom = bottom.max(y);
            left = left.min(x);
            right = right.max(x);
        }
    }

    found.then(|| Rect::new(left, top, right - left + 1, bottom - top + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_uniform_background_has_no_content() {
        let img = RgbaImage::from_pixel(8, 6, WHITE);
        assert_eq!(scan(&img, ScanMode::color_key(Color::WHITE)), None);
    }

    #[test]
    fn test_near_background_noise_is_ignored() {
        let mut img = RgbaImage::from_pixel(8, 6, WHITE);
        // 20 away is still background
        img.put_pixel(3, 3, Rgba([235, 235, 235, 255]));
        assert_eq!(scan(&img, ScanMode::color_key(Color::WHITE)), None);

        img.put_pixel(4, 2, Rgba([234, 255, 255, 255]));
        assert_eq!(scan(&img, ScanMode::color_key(Color::WHITE)), Some(Rect::new(4, 2, 1, 1)));
    }

    #[test]
    fn test_fully_transparent_has_no_content() {
        let img = RgbaImage::new(5, 5);
        assert_eq!(scan(&img, ScanMode::Alpha), None);
    }

    #[test]
    fn test_alpha_mode_ignores_color() {
        // Opaque white is content in alpha mode even though it matches the key
        let mut img = RgbaImage::new(10, 10);
        img.put_pixel(2, 7, WHITE);
        img.put_pixel(6, 1, Rgba([0, 0, 0, 1]));
        assert_eq!(scan(&img, ScanMode::Alpha), Some(Rect::new(2, 1, 5, 7)));
    }

    #[test]
    fn test_bounding_box_spans_extremes() {
        let mut img = RgbaImage::from_pixel(20, 10, WHITE);
        for (x, y) in [(5, 2), (12, 3), (7, 8)] {
            img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
        let rect = scan(&img, ScanMode::color_key(Color::WHITE)).unwrap();
        assert_eq!(rect, Rect::new(5, 2, 8, 7));
        assert!(rect.fits_within(20, 10));
    }

    #[test]
    fn test_custom_tolerance() {
        let mut img = RgbaImage::from_pixel(4, 4, WHITE);
        img.put_pixel(1, 1, Rgba([250, 250, 250, 255]));
        let strict = ScanMode::ColorKey(ColorMatcher::new(Color::WHITE, 0));
        assert_eq!(scan(&img, strict), Some(Rect::new(1, 1, 1, 1)));
    }

    #[test]
    fn test_rect_helpers() {
        assert!(Rect::full(4, 3).is_full(4, 3));
        assert!(!Rect::new(1, 0, 4, 3).fits_within(4, 3));
        assert!(!Rect::new(0, 0, 0, 3).fits_within(4, 3));
        assert!(!Rect::new(u32::MAX, 0, 2, 1).fits_within(4, 3));
    }

    proptest! {
        #[test]
        fn prop_single_pixel_is_found(w in 1u32..40, h in 1u32..40, seed: (u32, u32)) {
            let (x, y) = (seed.0 % w, seed.1 % h);
            let mut img = RgbaImage::from_pixel(w, h, WHITE);
            img.put_pixel(x, y, Rgba([10, 200, 30, 255]));

            let rect = scan(&img, ScanMode::color_key(Color::WHITE));
            prop_assert_eq!(rect, Some(Rect::new(x, y, 1, 1)));
        }

        #[test]
        fn prop_result_fits_buffer(
            w in 1u32..24,
            h in 1u32..24,
            pixels in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut img = RgbaImage::new(w, h);
            for (i, alpha) in pixels.iter().enumerate() {
                let i = i as u32;
                img.put_pixel(i % w, (i / w) % h, Rgba([0, 0, 0, *alpha]));
            }
            if let Some(rect) = scan(&img, ScanMode::Alpha) {
                prop_assert!(rect.fits_within(w, h));
            }
        }
    }
}
