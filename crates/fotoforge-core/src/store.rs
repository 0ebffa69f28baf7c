//! Saving processed images: naming rule, counter, and the two save modes.
//!
//! Saved files are named `{prefix}_{counter}_{original-basename}`. The
//! counter is session-scoped and increments only when a write actually
//! succeeds, so a failed or cancelled save never burns a number.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::io::{write_image, SaveError};

/// Where and how processed images are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Destination directory for quick saves. Created on first use.
    pub output_dir: PathBuf,
    /// Leading component of generated filenames.
    pub prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            prefix: "processed".to_string(),
        }
    }
}

/// Default quick-save directory: `FotoForge` under the platform pictures
/// directory, or under the working directory when the platform has none.
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("FotoForge")
}

/// Writes processed buffers to disk with generated names.
#[derive(Debug)]
pub struct ImageStore {
    counter: u32,
    config: StoreConfig,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl ImageStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { counter: 1, config }
    }

    /// Value the next saved file will be numbered with.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Filename suggested for the next save of `original_path`:
    /// `{prefix}_{counter}_{basename}`.
    pub fn suggested_name(&self, original_path: &Path) -> String {
        let basename = original_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string());
        format!("{}_{}_{}", self.config.prefix, self.counter, basename)
    }

    /// Save to a destination chosen in a dialog.
    ///
    /// `None` means the user cancelled: that is a signal, not an error,
    /// and the counter stays put. `Some(path)` writes there and returns
    /// the path back on success.
    pub fn save_interactive(
        &mut self,
        buf: &PixelBuffer,
        destination: Option<PathBuf>,
    ) -> Result<Option<PathBuf>, SaveError> {
        let Some(path) = destination else {
            return Ok(None);
        };
        write_image(buf, &path)?;
        self.counter += 1;
        Ok(Some(path))
    }

    /// Save under the configured output directory with a generated name,
    /// creating the directory if it does not exist yet.
    pub fn save_auto(
        &mut self,
        buf: &PixelBuffer,
        original_path: &Path,
    ) -> Result<PathBuf, SaveError> {
        std::fs::create_dir_all(&self.config.output_dir).map_err(|source| {
            SaveError::CreateDir {
                dir: self.config.output_dir.clone(),
                source,
            }
        })?;
        let path = self.config.output_dir.join(self.suggested_name(original_path));
        write_image(buf, &path)?;
        self.counter += 1;
        Ok(path)
    }
}
