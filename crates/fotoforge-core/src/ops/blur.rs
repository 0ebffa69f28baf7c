//! Smoothing filters: Gaussian, median, and bilateral.

use std::fmt;
use std::str::FromStr;

use imageproc::filter::{gaussian_blur_f32, median_filter};
use serde::{Deserialize, Serialize};

use super::{kernel_sigma, validate_kernel, OpError};
use crate::buffer::PixelBuffer;

/// Range sigma of the bilateral filter (how different two samples may be
/// and still average together).
pub const BILATERAL_SIGMA_COLOR: f32 = 80.0;

/// Spatial sigma of the bilateral filter.
pub const BILATERAL_SIGMA_SPACE: f32 = 80.0;

/// The kernel family applied by [`blur`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurKind {
    Gaussian,
    Median,
    Bilateral,
}

impl BlurKind {
    /// All kinds, for building selector UIs.
    pub const ALL: [BlurKind; 3] = [BlurKind::Gaussian, BlurKind::Median, BlurKind::Bilateral];

    pub fn name(self) -> &'static str {
        match self {
            BlurKind::Gaussian => "gaussian",
            BlurKind::Median => "median",
            BlurKind::Bilateral => "bilateral",
        }
    }
}

impl fmt::Display for BlurKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlurKind {
    type Err = OpError;

    /// Unknown names are a validation error, not a silent pass-through.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gaussian" => Ok(BlurKind::Gaussian),
            "median" => Ok(BlurKind::Median),
            "bilateral" => Ok(BlurKind::Bilateral),
            other => Err(OpError::UnknownBlurKind(other.to_string())),
        }
    }
}

/// Smooth the buffer with the selected kernel family.
///
/// `kernel_size` is the full window width and must be odd and nonzero.
pub fn blur(buf: &PixelBuffer, kind: BlurKind, kernel_size: u32) -> Result<PixelBuffer, OpError> {
    validate_kernel(kernel_size)?;
    if buf.is_empty() {
        return Ok(buf.clone());
    }
    let Some(rgb) = buf.to_rgb_image() else {
        return Ok(buf.clone());
    };

    let out = match kind {
        BlurKind::Gaussian => gaussian_blur_f32(&rgb, kernel_sigma(kernel_size)),
        BlurKind::Median => {
            let radius = kernel_size / 2;
            median_filter(&rgb, radius, radius)
        }
        BlurKind::Bilateral => {
            return Ok(bilateral(
                buf,
                kernel_size / 2,
                BILATERAL_SIGMA_COLOR,
                BILATERAL_SIGMA_SPACE,
            ))
        }
    };

    Ok(PixelBuffer::from_rgb_image(out))
}

/// Edge-preserving bilateral filter.
///
/// Each output sample is a weighted average over the window, where the
/// weight is the product of a spatial Gaussian and a range Gaussian over
/// the color distance to the center pixel. Flat regions smooth out while
/// hard edges keep their two populations separate.
fn bilateral(buf: &PixelBuffer, radius: u32, sigma_color: f32, sigma_space: f32) -> PixelBuffer {
    let w = buf.width as i64;
    let h = buf.height as i64;
    let r = radius as i64;

    let inv_2_sigma_color2 = 1.0 / (2.0 * sigma_color * sigma_color);
    let inv_2_sigma_space2 = 1.0 / (2.0 * sigma_space * sigma_space);

    let mut pixels = Vec::with_capacity(buf.pixels.len());
    for y in 0..h {
        for x in 0..w {
            let center = sample(buf, x, y);

            let mut acc = [0.0f32; 3];
            let mut weight_sum = 0.0f32;

            for dy in -r..=r {
                for dx in -r..=r {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let neighbor = sample(buf, nx, ny);

                    let spatial = ((dx * dx + dy * dy) as f32) * inv_2_sigma_space2;
                    let dr = neighbor[0] - center[0];
                    let dg = neighbor[1] - center[1];
                    let db = neighbor[2] - center[2];
                    let range = (dr * dr + dg * dg + db * db) * inv_2_sigma_color2;
                    let weight = (-(spatial + range)).exp();

                    acc[0] += neighbor[0] * weight;
                    acc[1] += neighbor[1] * weight;
                    acc[2] += neighbor[2] * weight;
                    weight_sum += weight;
                }
            }

            for channel in &acc {
                pixels.push((channel / weight_sum).clamp(0.0, 255.0).round() as u8);
            }
        }
    }

    PixelBuffer::new(buf.width, buf.height, pixels)
}

#[inline]
fn sample(buf: &PixelBuffer, x: i64, y: i64) -> [f32; 3] {
    let idx = ((y * buf.width as i64 + x) * 3) as usize;
    [
        buf.pixels[idx] as f32,
        buf.pixels[idx + 1] as f32,
        buf.pixels[idx + 2] as f32,
    ]
}
