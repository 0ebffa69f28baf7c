//! The in-memory pixel buffer shared by every layer of the crate.
//!
//! A [`PixelBuffer`] is RGB8, row-major, 3 bytes per pixel. Zero-area
//! buffers (width or height 0, no pixel data) are valid values - a crop
//! whose clamped rectangle collapses produces one - so nothing in this
//! module treats them as an error.

use image::{GrayImage, RgbImage};

/// An RGB8 image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is always width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGB data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A buffer with the given dimensions and no pixel data.
    ///
    /// Either dimension may be nonzero as long as the area is zero; the
    /// dimensions are kept so callers can still report the rectangle size.
    pub fn zero_area(width: u32, height: u32) -> Self {
        debug_assert!(width == 0 || height == 0);
        Self {
            width,
            height,
            pixels: Vec::new(),
        }
    }

    /// A buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 3);
        for _ in 0..(width as usize) * (height as usize) {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an `image::RgbImage`.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbImage` for codec and filter calls.
    ///
    /// Returns `None` for zero-area buffers, which the `image` crate cannot
    /// represent usefully.
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        if self.is_empty() {
            return None;
        }
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Collapse to a single-channel luminance image (ITU-R BT.709 weights).
    pub fn to_luma_image(&self) -> GrayImage {
        let mut plane = Vec::with_capacity((self.width as usize) * (self.height as usize));
        for chunk in self.pixels.chunks_exact(3) {
            plane.push(luminance(chunk[0], chunk[1], chunk[2]));
        }
        GrayImage::from_raw(self.width, self.height, plane)
            .unwrap_or_else(|| GrayImage::new(self.width, self.height))
    }

    /// Replicate a single-channel plane into all three channels.
    ///
    /// This is how grayscale transform results (equalization, edge maps)
    /// come back into the RGB display layout.
    pub fn from_luma_plane(width: u32, height: u32, plane: &[u8]) -> Self {
        debug_assert_eq!(plane.len(), (width as usize) * (height as usize));
        let mut pixels = Vec::with_capacity(plane.len() * 3);
        for &v in plane {
            pixels.extend_from_slice(&[v, v, v]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Size of the pixel data in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// True when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Luminance of an RGB sample using ITU-R BT.709 coefficients.
#[inline]
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let lum = 0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = PixelBuffer::new(4, 2, vec![7u8; 4 * 2 * 3]);
        assert_eq!(buf.pixel_count(), 8);
        assert_eq!(buf.byte_size(), 24);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_zero_area_buffer() {
        let buf = PixelBuffer::zero_area(5, 0);
        assert_eq!(buf.width, 5);
        assert_eq!(buf.height, 0);
        assert!(buf.is_empty());
        assert!(buf.to_rgb_image().is_none());
    }

    #[test]
    fn test_filled_buffer() {
        let buf = PixelBuffer::filled(2, 2, [1, 2, 3]);
        assert_eq!(buf.pixels, vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_rgb_image_round_trip() {
        let buf = PixelBuffer::new(3, 1, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);
        let img = buf.to_rgb_image().unwrap();
        assert_eq!(PixelBuffer::from_rgb_image(img), buf);
    }

    #[test]
    fn test_luma_of_gray_pixel_is_identity() {
        let buf = PixelBuffer::new(1, 1, vec![128, 128, 128]);
        let luma = buf.to_luma_image();
        assert_eq!(luma.get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn test_luma_weights_green_heaviest() {
        let green = PixelBuffer::new(1, 1, vec![0, 255, 0]);
        let blue = PixelBuffer::new(1, 1, vec![0, 0, 255]);
        assert!(green.to_luma_image().get_pixel(0, 0).0[0] > blue.to_luma_image().get_pixel(0, 0).0[0]);
    }

    #[test]
    fn test_from_luma_plane_replicates_channels() {
        let buf = PixelBuffer::from_luma_plane(2, 1, &[9, 200]);
        assert_eq!(buf.pixels, vec![9, 9, 9, 200, 200, 200]);
    }
}
