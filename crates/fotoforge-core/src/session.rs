//! Editing session: the list of opened files, the current image, and the
//! processed result.
//!
//! The session is the only stateful part of the core. Its invariants:
//!
//! - `processed` is always derived from `original`; transforms read the
//!   original buffer and replace the processed one.
//! - Rotation tracks a cumulative angle and is recomputed from the
//!   original in a single step each time, so repeated rotations never
//!   stack interpolation loss.
//! - A failed operation leaves every field exactly as it was.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::io::{load_image, LoadError, SaveError};
use crate::ops::{self, BlurKind, CropRect, EdgeParams, OpError, SampleFilter, ROTATE_FILL};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// An action that needs a loaded image ran with none present.
    #[error("no image loaded")]
    NoImage,

    /// Open was called with an empty path list.
    #[error("no images selected")]
    EmptySelection,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Op(#[from] OpError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

/// One editing session over an ordered list of image files.
#[derive(Debug, Default)]
pub struct Session {
    paths: Vec<PathBuf>,
    index: usize,
    original: Option<PixelBuffer>,
    processed: Option<PixelBuffer>,
    cumulative_angle: i32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once an image is loaded.
    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    pub fn processed(&self) -> Option<&PixelBuffer> {
        self.processed.as_ref()
    }

    /// Path of the image currently shown.
    pub fn current_path(&self) -> Option<&Path> {
        self.paths.get(self.index).map(PathBuf::as_path)
    }

    /// Zero-based position in the opened list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of opened files.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Total rotation applied to the original since the last load/reset.
    pub fn cumulative_angle(&self) -> i32 {
        self.cumulative_angle
    }

    /// Open a list of files, showing the first.
    ///
    /// The first file is loaded before any field changes, so a load
    /// failure leaves the previous session contents intact.
    pub fn open(&mut self, paths: Vec<PathBuf>) -> Result<(), EditError> {
        if paths.is_empty() {
            return Err(EditError::EmptySelection);
        }
        let original = load_image(&paths[0])?;

        self.paths = paths;
        self.index = 0;
        self.processed = Some(original.clone());
        self.original = Some(original);
        self.cumulative_angle = 0;
        Ok(())
    }

    /// Step to the next image; the index clamps at the end of the list.
    pub fn next(&mut self) -> Result<(), EditError> {
        if self.paths.is_empty() {
            return Err(EditError::NoImage);
        }
        self.go_to((self.index + 1).min(self.paths.len() - 1))
    }

    /// Step to the previous image; the index clamps at zero.
    pub fn previous(&mut self) -> Result<(), EditError> {
        if self.paths.is_empty() {
            return Err(EditError::NoImage);
        }
        self.go_to(self.index.saturating_sub(1))
    }

    /// Reload both buffers from disk at `index` and reset the angle.
    fn go_to(&mut self, index: usize) -> Result<(), EditError> {
        let original = load_image(&self.paths[index])?;

        self.index = index;
        self.processed = Some(original.clone());
        self.original = Some(original);
        self.cumulative_angle = 0;
        Ok(())
    }

    /// Restore the processed buffer to a fresh copy of the original.
    pub fn reset(&mut self) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        self.processed = Some(original.clone());
        self.cumulative_angle = 0;
        Ok(())
    }

    /// Local-contrast equalization of the original.
    pub fn equalize(&mut self) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        self.processed = Some(ops::equalize_histogram(original));
        Ok(())
    }

    /// Edge detection over the original.
    pub fn detect_edges(&mut self, params: &EdgeParams) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        self.processed = Some(ops::detect_edges(original, params)?);
        Ok(())
    }

    /// Color inversion of the original.
    pub fn invert(&mut self) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        self.processed = Some(ops::invert(original));
        Ok(())
    }

    /// Add `delta_degrees` to the cumulative angle, then recompute the
    /// rotation from the original in one step at the accumulated angle.
    pub fn rotate_by(&mut self, delta_degrees: i32) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        let angle = self.cumulative_angle + delta_degrees;
        self.processed = Some(ops::rotate_expanded(
            original,
            angle as f64,
            SampleFilter::Lanczos3,
            ROTATE_FILL,
        ));
        self.cumulative_angle = angle;
        Ok(())
    }

    /// Crop the original to `rect` (clamped; zero-area results allowed).
    pub fn crop(&mut self, rect: CropRect) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        self.processed = Some(ops::crop(original, rect));
        Ok(())
    }

    /// Smooth the original with the selected kernel family.
    pub fn blur(&mut self, kind: BlurKind, kernel_size: u32) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        self.processed = Some(ops::blur(original, kind, kernel_size)?);
        Ok(())
    }

    /// Brightness/contrast adjustment of the original.
    pub fn adjust(&mut self, brightness: i32, contrast: i32) -> Result<(), EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoImage)?;
        self.processed = Some(ops::adjust_brightness_contrast(
            original, brightness, contrast,
        )?);
        Ok(())
    }
}
