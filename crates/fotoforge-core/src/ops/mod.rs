//! The transform layer: stateless, independent pixel operations.
//!
//! Every function here takes a buffer (plus scalar parameters) and returns
//! a new buffer; none mutate their input and none depend on any other
//! transform having run. Operations with parameters validate them and fail
//! with [`OpError`] before touching pixels; operations without parameters
//! are total over any validly shaped buffer.

mod adjust;
mod blur;
mod crop;
mod edges;
mod equalize;
mod invert;
mod rotate;

pub use adjust::adjust_brightness_contrast;
pub use blur::{blur, BlurKind};
pub use crop::{crop, CropRect};
pub use edges::{detect_edges, EdgeParams};
pub use equalize::equalize_histogram;
pub use invert::invert;
pub use rotate::{rotate_expanded, rotated_bounds, SampleFilter, ROTATE_FILL};

use thiserror::Error;

/// Parameter-validation failures for the transform layer.
#[derive(Debug, Error, PartialEq)]
pub enum OpError {
    /// Filter kernels must be odd so they have a center sample.
    #[error("kernel size must be odd and nonzero, got {0}")]
    BadKernelSize(u32),

    /// Canny needs its thresholds ordered.
    #[error("edge thresholds out of order: low {low} > high {high}")]
    ThresholdOrder { low: f32, high: f32 },

    /// Contrast values outside (-127, 128) have no defined gain factor.
    #[error("contrast {0} outside the supported range -126..=127")]
    ContrastRange(i32),

    /// Brightness offsets beyond a full sample range are meaningless.
    #[error("brightness {0} outside the supported range -255..=255")]
    BrightnessRange(i32),

    /// The blur kind name matched no known kernel family.
    #[error("unknown blur kind {0:?} (expected gaussian, median, or bilateral)")]
    UnknownBlurKind(String),
}

/// Check that a kernel size is odd and nonzero.
pub(crate) fn validate_kernel(size: u32) -> Result<(), OpError> {
    if size == 0 || size % 2 == 0 {
        return Err(OpError::BadKernelSize(size));
    }
    Ok(())
}

/// Gaussian sigma for a given odd kernel size.
///
/// Matches the conventional kernel-to-sigma mapping used when callers give
/// a window size instead of a sigma: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub(crate) fn kernel_sigma(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}
