//! Contrast-limited adaptive histogram equalization.
//!
//! The image is collapsed to luminance, equalized tile by tile with a
//! clipped histogram, and blended bilinearly between neighboring tile
//! mappings so tile boundaries stay invisible. The equalized plane is
//! replicated back into the RGB display layout.

use crate::buffer::PixelBuffer;

/// Histogram clip limit, as a multiple of the uniform bin height.
pub const CLIP_LIMIT: f32 = 3.0;

/// Tile grid is `TILE_GRID x TILE_GRID`.
pub const TILE_GRID: usize = 16;

/// Equalize local contrast over the luminance channel.
///
/// Deterministic for a given input; empty buffers pass through unchanged.
pub fn equalize_histogram(buf: &PixelBuffer) -> PixelBuffer {
    if buf.is_empty() {
        return buf.clone();
    }
    let luma = buf.to_luma_image();
    let (w, h) = (buf.width as usize, buf.height as usize);
    let plane = clahe(luma.as_raw(), w, h, TILE_GRID, TILE_GRID, CLIP_LIMIT);
    PixelBuffer::from_luma_plane(buf.width, buf.height, &plane)
}

/// CLAHE over a single-channel plane.
///
/// Images smaller than the tile grid fall back to a plain copy: a tile
/// with no pixels has no histogram to equalize.
fn clahe(
    plane: &[u8],
    w: usize,
    h: usize,
    tiles_x: usize,
    tiles_y: usize,
    clip_limit: f32,
) -> Vec<u8> {
    if w == 0 || h == 0 || tiles_x == 0 || tiles_y == 0 {
        return plane.to_vec();
    }
    let tile_w = w / tiles_x;
    let tile_h = h / tiles_y;
    if tile_w == 0 || tile_h == 0 {
        return plane.to_vec();
    }

    // Per-tile clipped-histogram CDF lookup tables. The last tile in each
    // direction absorbs the remainder rows/columns.
    let mut maps = vec![[0u8; 256]; tiles_x * tiles_y];

    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = if tx == tiles_x - 1 { w } else { x0 + tile_w };
            let y1 = if ty == tiles_y - 1 { h } else { y0 + tile_h };
            let tile_pixels = (x1 - x0) * (y1 - y0);

            let mut hist = [0u32; 256];
            for row in y0..y1 {
                for col in x0..x1 {
                    hist[plane[row * w + col] as usize] += 1;
                }
            }

            // Clip the histogram and spread the excess uniformly.
            let clip = ((clip_limit * tile_pixels as f32 / 256.0) as u32).max(1);
            let mut excess = 0u32;
            for bin in hist.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let per_bin = excess / 256;
            let remainder = (excess % 256) as usize;
            for (i, bin) in hist.iter_mut().enumerate() {
                *bin += per_bin;
                if i < remainder {
                    *bin += 1;
                }
            }

            let mut cdf = [0u32; 256];
            cdf[0] = hist[0];
            for i in 1..256 {
                cdf[i] = cdf[i - 1] + hist[i];
            }
            let cdf_min = *cdf.iter().find(|&&v| v > 0).unwrap_or(&0);
            let denom = cdf[255].saturating_sub(cdf_min);

            let map = &mut maps[ty * tiles_x + tx];
            for (i, slot) in map.iter_mut().enumerate() {
                if denom == 0 {
                    *slot = i as u8;
                } else {
                    let v = (cdf[i].saturating_sub(cdf_min) as f32 / denom as f32) * 255.0;
                    *slot = (v as u32).min(255) as u8;
                }
            }
        }
    }

    // Blend each pixel between the four nearest tile mappings.
    let mut result = vec![0u8; w * h];
    let tw_f = tile_w as f32;
    let th_f = tile_h as f32;

    for y in 0..h {
        for x in 0..w {
            let level = plane[y * w + x] as usize;

            let fx = (x as f32 + 0.5) / tw_f - 0.5;
            let fy = (y as f32 + 0.5) / th_f - 0.5;

            let tx0 = (fx.floor() as i32).clamp(0, tiles_x as i32 - 1) as usize;
            let tx1 = (fx.floor() as i32 + 1).clamp(0, tiles_x as i32 - 1) as usize;
            let ty0 = (fy.floor() as i32).clamp(0, tiles_y as i32 - 1) as usize;
            let ty1 = (fy.floor() as i32 + 1).clamp(0, tiles_y as i32 - 1) as usize;

            let ax = fx - fx.floor();
            let ay = fy - fy.floor();

            let v00 = maps[ty0 * tiles_x + tx0][level] as f32;
            let v10 = maps[ty0 * tiles_x + tx1][level] as f32;
            let v01 = maps[ty1 * tiles_x + tx0][level] as f32;
            let v11 = maps[ty1 * tiles_x + tx1][level] as f32;

            let top = v00 * (1.0 - ax) + v10 * ax;
            let bottom = v01 * (1.0 - ax) + v11 * ax;
            let value = top * (1.0 - ay) + bottom * ay;

            result[y * w + x] = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equalize_preserves_dimensions() {
        let buf = PixelBuffer::filled(64, 48, [120, 130, 140]);
        let out = equalize_histogram(&buf);
        assert_eq!((out.width, out.height), (64, 48));
        assert_eq!(out.byte_size(), buf.byte_size());
    }

    #[test]
    fn test_equalize_output_is_grayscale() {
        let mut pixels = Vec::new();
        for i in 0..64 * 64 {
            pixels.extend_from_slice(&[(i % 256) as u8, ((i * 3) % 256) as u8, 200]);
        }
        let buf = PixelBuffer::new(64, 64, pixels);

        let out = equalize_histogram(&buf);
        for chunk in out.pixels.chunks_exact(3) {
            assert_eq!(chunk[0], chunk[1]);
            assert_eq!(chunk[1], chunk[2]);
        }
    }

    #[test]
    fn test_equalize_uniform_image_stays_uniform() {
        let buf = PixelBuffer::filled(64, 64, [128, 128, 128]);
        let out = equalize_histogram(&buf);
        let first = out.pixels[0];
        assert!(out.pixels.iter().all(|&v| v == first));
    }

    #[test]
    fn test_equalize_is_deterministic() {
        let mut pixels = Vec::new();
        for i in 0..80 * 60 {
            let v = ((i * 7) % 256) as u8;
            pixels.extend_from_slice(&[v, v.wrapping_add(5), v.wrapping_mul(3)]);
        }
        let buf = PixelBuffer::new(80, 60, pixels);

        assert_eq!(equalize_histogram(&buf), equalize_histogram(&buf));
    }

    #[test]
    fn test_equalize_stretches_local_contrast() {
        // A compressed sawtooth (100..160) repeating inside every tile
        // should cover a noticeably wider range afterwards.
        let mut pixels = Vec::new();
        for _ in 0..256u32 {
            for x in 0..256u32 {
                let v = 100 + ((x % 16) * 4) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let buf = PixelBuffer::new(256, 256, pixels);

        let out = equalize_histogram(&buf);
        let min = *out.pixels.iter().min().unwrap();
        let max = *out.pixels.iter().max().unwrap();
        assert!(max - min > 80, "range only {}..{}", min, max);
    }

    #[test]
    fn test_equalize_tiny_image_passes_through() {
        // Smaller than the tile grid: luminance copy, no equalization.
        let buf = PixelBuffer::new(2, 2, vec![10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40]);
        let out = equalize_histogram(&buf);
        assert_eq!(out.pixels[0], 10);
        assert_eq!(out.pixels[3], 20);
    }

    #[test]
    fn test_equalize_empty_buffer() {
        let out = equalize_histogram(&PixelBuffer::zero_area(0, 0));
        assert!(out.is_empty());
    }
}
