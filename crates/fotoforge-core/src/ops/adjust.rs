//! Brightness and contrast adjustment.
//!
//! Both controls are affine sample maps. Brightness `b` lifts or lowers
//! the whole ramp by moving its endpoints: positive values map [0, 255]
//! onto [b, 255], negative values onto [0, 255 + b]. Contrast `c` is
//! turned into a gain around the mid-gray point 127 with
//! `f = 131 * (c + 127) / (127 * (131 - c))` and offset `127 * (1 - f)`.
//! Either control at 0 is exactly the identity.

use super::OpError;
use crate::buffer::PixelBuffer;

/// Apply brightness then contrast; both values may be zero (no-op).
pub fn adjust_brightness_contrast(
    buf: &PixelBuffer,
    brightness: i32,
    contrast: i32,
) -> Result<PixelBuffer, OpError> {
    if !(-255..=255).contains(&brightness) {
        return Err(OpError::BrightnessRange(brightness));
    }
    if !(-126..=127).contains(&contrast) {
        return Err(OpError::ContrastRange(contrast));
    }
    if brightness == 0 && contrast == 0 {
        return Ok(buf.clone());
    }

    let mut out = buf.clone();

    if brightness != 0 {
        let (shadow, highlight) = if brightness > 0 {
            (brightness as f32, 255.0)
        } else {
            (0.0, 255.0 + brightness as f32)
        };
        let alpha = (highlight - shadow) / 255.0;
        let gamma = shadow;
        remap(&mut out.pixels, alpha, gamma);
    }

    if contrast != 0 {
        let c = contrast as f32;
        let f = 131.0 * (c + 127.0) / (127.0 * (131.0 - c));
        remap(&mut out.pixels, f, 127.0 * (1.0 - f));
    }

    Ok(out)
}

#[inline]
fn remap(pixels: &mut [u8], alpha: f32, gamma: f32) {
    for v in pixels.iter_mut() {
        *v = (*v as f32 * alpha + gamma).clamp(0.0, 255.0).round() as u8;
    }
}
