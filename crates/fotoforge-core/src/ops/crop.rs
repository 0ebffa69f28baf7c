//! Rectangular cropping with silent bounds clamping.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// A crop rectangle in image space.
///
/// Coordinates are signed: the crop gesture can start or end outside the
/// image, and [`crop`] clamps instead of rejecting. For a W x H source the
/// output is always exactly
/// `min(max(w, 0), W - clamp(x)) x min(max(h, 0), H - clamp(y))` pixels,
/// which may be zero in either dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CropRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two corner points in any order, the way a
    /// press/release drag gesture produces them.
    pub fn from_corners(a: (i64, i64), b: (i64, i64)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }

    /// The effective `(x, y, width, height)` after clamping to a `w x h`
    /// source.
    pub fn clamped(&self, w: u32, h: u32) -> (u32, u32, u32, u32) {
        let x = self.x.clamp(0, w as i64);
        let y = self.y.clamp(0, h as i64);
        let out_w = self.width.max(0).min(w as i64 - x);
        let out_h = self.height.max(0).min(h as i64 - y);
        (x as u32, y as u32, out_w as u32, out_h as u32)
    }
}

/// Return the sub-buffer covered by `rect`, clamped to the source bounds.
///
/// Out-of-range and negative inputs are clamped, never rejected; a
/// rectangle that collapses entirely yields a zero-area buffer.
pub fn crop(buf: &PixelBuffer, rect: CropRect) -> PixelBuffer {
    let (x, y, out_w, out_h) = rect.clamped(buf.width, buf.height);

    if out_w == 0 || out_h == 0 {
        return PixelBuffer {
            width: out_w,
            height: out_h,
            pixels: Vec::new(),
        };
    }

    let src_w = buf.width as usize;
    let mut pixels = Vec::with_capacity((out_w as usize) * (out_h as usize) * 3);
    for row in y..y + out_h {
        let start = ((row as usize) * src_w + x as usize) * 3;
        let end = start + (out_w as usize) * 3;
        pixels.extend_from_slice(&buf.pixels[start..end]);
    }

    PixelBuffer::new(out_w, out_h, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source image where each pixel encodes its position.
    fn positional(w: u32, h: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((w as usize) * (h as usize) * 3);
        for y in 0..h {
            for x in 0..w {
                let v = ((y * w + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(w, h, pixels)
    }

    #[test]
    fn test_interior_crop() {
        let src = positional(10, 10);
        let out = crop(&src, CropRect::new(2, 3, 4, 5));
        assert_eq!((out.width, out.height), (4, 5));
        // Top-left pixel comes from (2, 3): value 32.
        assert_eq!(out.pixels[0], 32);
    }

    #[test]
    fn test_full_crop_is_identity() {
        let src = positional(8, 6);
        assert_eq!(crop(&src, CropRect::new(0, 0, 8, 6)), src);
    }

    #[test]
    fn test_negative_origin_clamps_to_zero() {
        let src = positional(10, 10);
        let out = crop(&src, CropRect::new(-5, -5, 6, 6));
        // Origin clamps to (0, 0); the requested 6x6 still fits.
        assert_eq!((out.width, out.height), (6, 6));
        assert_eq!(out.pixels[0], 0);
    }

    #[test]
    fn test_oversized_rect_clamps_to_source() {
        let src = positional(10, 10);
        let out = crop(&src, CropRect::new(4, 4, 100, 100));
        assert_eq!((out.width, out.height), (6, 6));
    }

    #[test]
    fn test_origin_past_edge_gives_zero_area() {
        let src = positional(10, 10);
        let out = crop(&src, CropRect::new(10, 0, 5, 5));
        assert_eq!(out.width, 0);
        assert_eq!(out.height, 5);
        assert!(out.is_empty());
    }

    #[test]
    fn test_negative_size_gives_zero_area() {
        let src = positional(10, 10);
        let out = crop(&src, CropRect::new(2, 2, -4, 3));
        assert_eq!((out.width, out.height), (0, 3));
        assert!(out.pixels.is_empty());
    }

    #[test]
    fn test_from_corners_any_order() {
        let a = CropRect::from_corners((2, 3), (7, 9));
        let b = CropRect::from_corners((7, 9), (2, 3));
        assert_eq!(a, b);
        assert_eq!(a, CropRect::new(2, 3, 5, 6));
    }

    #[test]
    fn test_crop_of_empty_buffer() {
        let out = crop(&PixelBuffer::zero_area(0, 0), CropRect::new(0, 0, 4, 4));
        assert!(out.is_empty());
    }
}
