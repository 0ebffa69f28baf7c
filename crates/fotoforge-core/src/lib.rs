//! FotoForge Core - Image processing library
//!
//! This crate provides the non-GUI functionality of FotoForge: the pixel
//! buffer type, file loading/saving, the per-image transform layer, the
//! display-fit math for the preview panes, the session/navigation state,
//! and the save-location naming rule.

pub mod buffer;
pub mod display;
pub mod io;
pub mod ops;
pub mod session;
pub mod store;

pub use buffer::PixelBuffer;
pub use ops::{BlurKind, CropRect, EdgeParams, OpError, SampleFilter};
pub use session::{EditError, Session};
pub use store::{ImageStore, StoreConfig};
