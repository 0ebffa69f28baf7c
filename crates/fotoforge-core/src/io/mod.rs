//! File loading and saving.
//!
//! Decoding and encoding both go through the `image` crate; the format is
//! picked from the file extension on save and sniffed from the content on
//! load.

mod load;
mod save;

pub use load::{load_image, LoadError, SUPPORTED_EXTENSIONS};
pub use save::{write_image, SaveError};
