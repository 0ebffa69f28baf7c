//! Color inversion.

use crate::buffer::PixelBuffer;

/// Per-sample bitwise complement of the buffer.
///
/// Involutive: applying it twice restores the original exactly.
pub fn invert(buf: &PixelBuffer) -> PixelBuffer {
    PixelBuffer {
        width: buf.width,
        height: buf.height,
        pixels: buf.pixels.iter().map(|&v| !v).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_complements_samples() {
        let buf = PixelBuffer::new(1, 1, vec![0, 128, 255]);
        assert_eq!(invert(&buf).pixels, vec![255, 127, 0]);
    }

    #[test]
    fn test_invert_preserves_dimensions() {
        let buf = PixelBuffer::filled(7, 3, [10, 20, 30]);
        let out = invert(&buf);
        assert_eq!((out.width, out.height), (7, 3));
    }

    #[test]
    fn test_invert_of_empty_is_empty() {
        let out = invert(&PixelBuffer::zero_area(0, 5));
        assert!(out.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: inversion is its own inverse for any buffer.
        #[test]
        fn prop_invert_is_involutive(
            (width, height) in (1u32..=32, 1u32..=32),
            seed in any::<u8>(),
        ) {
            let n = (width as usize) * (height as usize) * 3;
            let pixels: Vec<u8> = (0..n).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
            let buf = PixelBuffer::new(width, height, pixels);

            prop_assert_eq!(invert(&invert(&buf)), buf);
        }
    }
}
