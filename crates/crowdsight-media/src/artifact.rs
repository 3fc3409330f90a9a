//! Annotated-image artifact persistence.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::info;
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// Writes annotated images under a fixed directory, one uniquely named PNG
/// per request. Unique names mean concurrent requests never clobber each
/// other's artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Default artifact directory, relative to the working directory.
    pub const DEFAULT_DIR: &'static str = "artifacts";

    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store from the `ARTIFACT_DIR` environment variable.
    pub fn from_env() -> Self {
        Self::new(std::env::var("ARTIFACT_DIR").unwrap_or_else(|_| Self::DEFAULT_DIR.to_string()))
    }

    /// Directory artifacts are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an annotated image as a new PNG and return its path.
    pub fn save_png(&self, image: &RgbaImage) -> MediaResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(format!("{}.png", Uuid::new_v4()));
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(MediaError::Encode)?;

        info!(path = %path.display(), "saved annotated image");
        Ok(path)
    }
}
