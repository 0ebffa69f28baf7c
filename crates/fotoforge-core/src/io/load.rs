//! Image file loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Raster extensions offered by the open dialog.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

/// Errors raised while loading an image file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read at all.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a decodable image.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Load an image file into an RGB8 buffer.
///
/// The format is sniffed from the file content, not the extension, so a
/// mislabeled file still loads if any supported codec recognizes it.
pub fn load_image(path: &Path) -> Result<PixelBuffer, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbImage::from_fn(w, h, |x, y| image::Rgb([x as u8, y as u8, 7]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_round_trips_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "a.png", 20, 10);

        let buf = load_image(&path).unwrap();
        assert_eq!(buf.width, 20);
        assert_eq!(buf.height, 10);
        assert_eq!(buf.pixels[0..3], [0, 0, 7]);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn test_load_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }

    #[test]
    fn test_load_ignores_wrong_extension() {
        // PNG bytes behind a .jpg name still decode: content sniffing wins.
        let dir = tempfile::tempdir().unwrap();
        let png = write_test_png(dir.path(), "real.png", 4, 4);
        let mislabeled = dir.path().join("fake.jpg");
        std::fs::copy(&png, &mislabeled).unwrap();

        let buf = load_image(&mislabeled).unwrap();
        assert_eq!(buf.width, 4);
    }
}
