//! Color-keyed transparency synthesis.

use crate::color::{Color, ColorMatcher, DEFAULT_TOLERANCE};
use image::RgbaImage;

/// Zeroes alpha for every pixel within [`DEFAULT_TOLERANCE`] of `target`.
///
/// Returns the number of pixels erased.
pub fn make_color_transparent(buffer: &mut RgbaImage, target: Color) -> usize {
    rewrite(buffer, ColorMatcher::new(target, DEFAULT_TOLERANCE))
}

/// Zeroes alpha for every pixel the matcher considers erasable.
///
/// RGB channels are left as they are, so keyed pixels keep their tint.
pub fn rewrite(buffer: &mut RgbaImage, matcher: ColorMatcher) -> usize {
    let mut erased = 0;
    for pixel in buffer.pixels_mut() {
        if matcher.is_erasable(Color::from_pixel(pixel)) {
            pixel[3] = 0;
            erased += 1;
        }
    }
    erased
}
