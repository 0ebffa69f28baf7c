//! Rotation with bounding-box expansion.
//!
//! The output canvas grows to contain the whole rotated image and the
//! uncovered corners are filled with a fixed background color. Sampling is
//! inverse-mapped: each destination pixel looks up the source position it
//! came from and interpolates.
//!
//! Angles are normalized modulo 360 first, so a cumulative angle of 360 is
//! exactly the identity and the axis-aligned cases (90/180/270) take exact
//! copy paths with no interpolation at all.

use crate::buffer::PixelBuffer;

/// Background color for canvas area the rotated image does not cover.
pub const ROTATE_FILL: [u8; 3] = [255, 255, 255];

/// Interpolation used when sampling rotated pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFilter {
    /// Fast 4-tap interpolation, fine for interactive preview.
    #[default]
    Bilinear,
    /// 36-tap windowed-sinc interpolation for saved output.
    Lanczos3,
}

/// Bounding-box dimensions for a `w x h` image rotated by `angle_degrees`.
pub fn rotated_bounds(w: u32, h: u32, angle_degrees: f64) -> (u32, u32) {
    let angle = angle_degrees.rem_euclid(360.0);

    if near(angle, 0.0) || near(angle, 360.0) || near(angle, 180.0) {
        return (w, h);
    }
    if near(angle, 90.0) || near(angle, 270.0) {
        return (h, w);
    }

    let rad = angle.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let new_w = (w as f64 * cos + h as f64 * sin).round() as u32;
    let new_h = (w as f64 * sin + h as f64 * cos).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Rotate around the center, expanding the canvas to fit.
///
/// `angle_degrees` is taken modulo 360; positive angles rotate
/// counter-clockwise. Empty buffers pass through unchanged.
pub fn rotate_expanded(
    buf: &PixelBuffer,
    angle_degrees: f64,
    filter: SampleFilter,
    fill: [u8; 3],
) -> PixelBuffer {
    if buf.is_empty() {
        return buf.clone();
    }

    let angle = angle_degrees.rem_euclid(360.0);
    if near(angle, 0.0) || near(angle, 360.0) {
        return buf.clone();
    }

    // Axis-aligned rotations are lossless pixel shuffles.
    if let Some(rgb) = buf.to_rgb_image() {
        if near(angle, 90.0) {
            return PixelBuffer::from_rgb_image(image::imageops::rotate270(&rgb));
        }
        if near(angle, 180.0) {
            return PixelBuffer::from_rgb_image(image::imageops::rotate180(&rgb));
        }
        if near(angle, 270.0) {
            return PixelBuffer::from_rgb_image(image::imageops::rotate90(&rgb));
        }
    }

    let (dst_w, dst_h) = rotated_bounds(buf.width, buf.height, angle);

    // Inverse rotation: for each destination pixel, find the source point.
    // With y pointing down, the visually counter-clockwise map for +angle
    // inverts to src = [[cos, -sin], [sin, cos]] * dst.
    let rad = angle.to_radians();
    let (sin, cos) = (rad.sin(), rad.cos());

    let src_cx = buf.width as f64 / 2.0;
    let src_cy = buf.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut pixels = Vec::with_capacity((dst_w as usize) * (dst_h as usize) * 3);
    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let sample = match filter {
                SampleFilter::Bilinear => sample_bilinear(buf, src_x, src_y, fill),
                SampleFilter::Lanczos3 => sample_lanczos3(buf, src_x, src_y, fill),
            };
            pixels.extend_from_slice(&sample);
        }
    }

    PixelBuffer::new(dst_w, dst_h, pixels)
}

#[inline]
fn near(angle: f64, target: f64) -> bool {
    (angle - target).abs() < 1e-3
}

#[inline]
fn pixel_at(buf: &PixelBuffer, x: usize, y: usize) -> [f64; 3] {
    let idx = (y * buf.width as usize + x) * 3;
    [
        buf.pixels[idx] as f64,
        buf.pixels[idx + 1] as f64,
        buf.pixels[idx + 2] as f64,
    ]
}

/// 4-tap bilinear sample; positions outside the image return `fill`.
fn sample_bilinear(buf: &PixelBuffer, x: f64, y: f64, fill: [u8; 3]) -> [u8; 3] {
    let w = buf.width as i64;
    let h = buf.height as i64;

    if x < -0.5 || y < -0.5 || x > w as f64 - 0.5 || y > h as f64 - 0.5 {
        return fill;
    }

    let x0f = x.floor();
    let y0f = y.floor();
    let fx = x - x0f;
    let fy = y - y0f;

    // Taps clamp to the border so edge pixels do not bleed into fill.
    let x0 = (x0f as i64).clamp(0, w - 1) as usize;
    let x1 = (x0f as i64 + 1).clamp(0, w - 1) as usize;
    let y0 = (y0f as i64).clamp(0, h - 1) as usize;
    let y1 = (y0f as i64 + 1).clamp(0, h - 1) as usize;

    let p00 = pixel_at(buf, x0, y0);
    let p10 = pixel_at(buf, x1, y0);
    let p01 = pixel_at(buf, x0, y1);
    let p11 = pixel_at(buf, x1, y1);

    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        *slot = v.clamp(0.0, 255.0).round() as u8;
    }
    out
}

/// 6x6 Lanczos3 sample; falls back to bilinear near the borders where the
/// full window does not fit.
fn sample_lanczos3(buf: &PixelBuffer, x: f64, y: f64, fill: [u8; 3]) -> [u8; 3] {
    let w = buf.width as i64;
    let h = buf.height as i64;

    if x < 2.0 || y < 2.0 || x >= (w - 3) as f64 || y >= (h - 3) as f64 {
        return sample_bilinear(buf, x, y, fill);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let p = pixel_at(buf, px as usize, py as usize);
            sum[0] += p[0] * weight;
            sum[1] += p[1] * weight;
            sum[2] += p[2] * weight;
            weight_sum += weight;
        }
    }

    let mut out = [0u8; 3];
    if weight_sum > 0.0 {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }
    out
}

/// Lanczos kernel: `sinc(x) * sinc(x / a)` inside the window, else 0.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
