//! Display-fit scaling for the preview panes.
//!
//! The shell draws each buffer inside a fixed bounding box. The scale is
//! uniform - `min(box_w / img_w, box_h / img_h)` - so aspect ratio is
//! preserved, and the same scalar maps screen-space points back to image
//! space for the crop gesture. Centering inside the box is the shell's
//! concern at draw time.

use crate::buffer::PixelBuffer;

/// Color of the placeholder shown before any image is loaded.
pub const PLACEHOLDER_COLOR: [u8; 3] = [0, 0, 0];

/// Result of fitting an image into a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFit {
    /// Scaled width in pixels.
    pub width: u32,
    /// Scaled height in pixels.
    pub height: u32,
    /// The uniform scale factor that was applied.
    pub scale: f64,
}

/// Uniform scale factor fitting `src` inside `bounds`.
///
/// May be greater than 1.0: images smaller than the box are scaled up to
/// fill it, matching the preview behavior users expect from a fixed pane.
pub fn fit_scale(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> f64 {
    if src_w == 0 || src_h == 0 {
        return 1.0;
    }
    let sx = box_w as f64 / src_w as f64;
    let sy = box_h as f64 / src_h as f64;
    sx.min(sy)
}

/// Dimensions and scale for drawing `src` inside `bounds`.
pub fn fit_dimensions(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> DisplayFit {
    let scale = fit_scale(src_w, src_h, box_w, box_h);
    DisplayFit {
        width: ((src_w as f64 * scale).round() as u32).max(1),
        height: ((src_h as f64 * scale).round() as u32).max(1),
        scale,
    }
}

/// Solid placeholder buffer of the box size, used when nothing is loaded.
pub fn placeholder(box_w: u32, box_h: u32) -> PixelBuffer {
    PixelBuffer::filled(box_w, box_h, PLACEHOLDER_COLOR)
}

/// Rescale a buffer to fit the preview box, preserving aspect ratio.
///
/// Returns the resized buffer together with the scale that was applied.
/// Empty buffers (nothing loaded, or a zero-area crop result) come back as
/// the placeholder with scale 1.0.
pub fn prepare_for_display(buf: &PixelBuffer, box_w: u32, box_h: u32) -> (PixelBuffer, f64) {
    let Some(rgb) = buf.to_rgb_image() else {
        return (placeholder(box_w, box_h), 1.0);
    };
    let fit = fit_dimensions(buf.width, buf.height, box_w, box_h);
    if fit.width == buf.width && fit.height == buf.height {
        return (buf.clone(), 1.0);
    }
    let resized = image::imageops::resize(
        &rgb,
        fit.width,
        fit.height,
        image::imageops::FilterType::Lanczos3,
    );
    (PixelBuffer::from_rgb_image(resized), fit.scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale_landscape() {
        // 1200x600 into 600x600: width is the constraint
        let s = fit_scale(1200, 600, 600, 600);
        assert!((s - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fit_scale_portrait() {
        let s = fit_scale(300, 900, 600, 600);
        assert!((s - 600.0 / 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_scale_upscales_small_images() {
        let s = fit_scale(100, 50, 600, 600);
        assert!((s - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_dimensions_preserve_aspect() {
        let fit = fit_dimensions(1200, 800, 600, 600);
        assert_eq!(fit.width, 600);
        assert_eq!(fit.height, 400);
    }

    #[test]
    fn test_placeholder_size_and_color() {
        let p = placeholder(8, 4);
        assert_eq!(p.width, 8);
        assert_eq!(p.height, 4);
        assert!(p.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_prepare_for_display_resizes() {
        let buf = PixelBuffer::filled(1200, 600, [50, 60, 70]);
        let (shown, scale) = prepare_for_display(&buf, 600, 600);
        assert_eq!(shown.width, 600);
        assert_eq!(shown.height, 300);
        assert!((scale - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_prepare_for_display_exact_fit_is_copy() {
        let buf = PixelBuffer::filled(600, 600, [1, 2, 3]);
        let (shown, scale) = prepare_for_display(&buf, 600, 600);
        assert_eq!(shown, buf);
        assert!((scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_prepare_for_display_empty_gives_placeholder() {
        let (shown, scale) = prepare_for_display(&PixelBuffer::zero_area(0, 0), 600, 400);
        assert_eq!(shown.width, 600);
        assert_eq!(shown.height, 400);
        assert!((scale - 1.0).abs() < 1e-9);
    }
}
