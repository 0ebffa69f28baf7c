//! Canny edge detection.

use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use serde::{Deserialize, Serialize};

use super::{kernel_sigma, validate_kernel, OpError};
use crate::buffer::PixelBuffer;

/// Parameters for [`detect_edges`]. The defaults match the standard
/// blur-then-double-threshold recipe for natural images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Pre-smoothing kernel size; must be odd and nonzero.
    pub blur_kernel: u32,
    /// Lower hysteresis threshold.
    pub low_threshold: f32,
    /// Upper hysteresis threshold.
    pub high_threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

impl EdgeParams {
    /// Check the kernel and threshold ordering.
    pub fn validate(&self) -> Result<(), OpError> {
        validate_kernel(self.blur_kernel)?;
        if self.low_threshold > self.high_threshold {
            return Err(OpError::ThresholdOrder {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        Ok(())
    }
}

/// Detect edges: luminance, Gaussian pre-blur, two-threshold Canny.
///
/// The binary edge map comes back replicated into all three channels, so
/// the result renders as white edges on black in the RGB preview.
pub fn detect_edges(buf: &PixelBuffer, params: &EdgeParams) -> Result<PixelBuffer, OpError> {
    params.validate()?;
    if buf.is_empty() {
        return Ok(buf.clone());
    }

    let luma = buf.to_luma_image();
    let blurred = gaussian_blur_f32(&luma, kernel_sigma(params.blur_kernel));
    let edges = canny(&blurred, params.low_threshold, params.high_threshold);

    Ok(PixelBuffer::from_luma_plane(
        buf.width,
        buf.height,
        edges.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Half-black, half-white image with one clean vertical edge.
    fn step_image(w: u32, h: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((w as usize) * (h as usize) * 3);
        for _ in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(w, h, pixels)
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(EdgeParams::default().validate().is_ok());
    }

    #[test]
    fn test_even_kernel_rejected() {
        let params = EdgeParams {
            blur_kernel: 4,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(OpError::BadKernelSize(4)));
    }

    #[test]
    fn test_reversed_thresholds_rejected() {
        let params = EdgeParams {
            low_threshold: 200.0,
            high_threshold: 50.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(OpError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_step_edge_is_found() {
        let buf = step_image(64, 64);
        let out = detect_edges(&buf, &EdgeParams::default()).unwrap();

        assert_eq!((out.width, out.height), (64, 64));
        // Some pixels near the step must light up.
        assert!(out.pixels.iter().any(|&v| v == 255));
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let buf = PixelBuffer::filled(64, 64, [90, 90, 90]);
        let out = detect_edges(&buf, &EdgeParams::default()).unwrap();
        assert!(out.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_output_is_binary_grayscale() {
        let buf = step_image(48, 48);
        let out = detect_edges(&buf, &EdgeParams::default()).unwrap();
        for chunk in out.pixels.chunks_exact(3) {
            assert!(chunk[0] == 0 || chunk[0] == 255);
            assert_eq!(chunk[0], chunk[1]);
            assert_eq!(chunk[1], chunk[2]);
        }
    }

    #[test]
    fn test_invalid_params_dont_touch_buffer() {
        let buf = step_image(16, 16);
        let bad = EdgeParams {
            blur_kernel: 0,
            ..Default::default()
        };
        assert!(detect_edges(&buf, &bad).is_err());
    }
}
