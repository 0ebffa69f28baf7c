//! Image file saving.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors raised while writing an image file. Every variant names the
/// destination path so the shell can show it verbatim.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The destination extension maps to no known codec.
    #[error("unsupported image format for {path}")]
    UnsupportedFormat { path: PathBuf },

    /// A zero-area buffer cannot be encoded.
    #[error("cannot save an empty image to {path}")]
    EmptyBuffer { path: PathBuf },

    /// The encoder or the filesystem rejected the write.
    #[error("failed to save image to {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The destination directory could not be created.
    #[error("failed to create directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode a buffer to `path`, picking the codec from the extension.
pub fn write_image(buf: &PixelBuffer, path: &Path) -> Result<(), SaveError> {
    // Reject unknown extensions up front so the error names the real
    // problem instead of a generic encode failure.
    image::ImageFormat::from_path(path).map_err(|_| SaveError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let rgb = buf.to_rgb_image().ok_or_else(|| SaveError::EmptyBuffer {
        path: path.to_path_buf(),
    })?;

    rgb.save(path).map_err(|source| SaveError::Encode {
        path: path.to_path_buf(),
        source,
    })
}
