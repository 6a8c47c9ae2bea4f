/// Selection manager
///
/// Owns the currently selected image and its preview. A new selection
/// releases the previous preview before it becomes visible.
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::preview::{self, Preview, PreviewCache};

/// Errors raised while selecting an image
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("could not read file: {0}")]
    Io(String),
    #[error("not a readable image: {0}")]
    Decode(String),
    #[error("could not write preview: {0}")]
    PreviewWrite(String),
}

/// The user's chosen image
#[derive(Debug)]
pub struct SelectedImage {
    pub path: PathBuf,
    /// Filename only (e.g. "photo.jpg")
    pub file_name: String,
    pub mime: &'static str,
    pub preview: Preview,
}

#[derive(Debug)]
pub struct SelectionManager {
    cache: PreviewCache,
    current: Option<SelectedImage>,
    generation: u64,
}

impl SelectionManager {
    pub fn new(cache: PreviewCache) -> Self {
        Self {
            cache,
            current: None,
            generation: 0,
        }
    }

    pub fn current(&self) -> Option<&SelectedImage> {
        self.current.as_ref()
    }

    /// Select a new image file.
    ///
    /// On failure the previous selection stays active.
    pub fn select_file(&mut self, path: &Path) -> Result<&SelectedImage, SelectError> {
        if !preview::is_supported(path) {
            return Err(SelectError::Unsupported(path.display().to_string()));
        }

        let bytes = fs::read(path).map_err(|e| SelectError::Io(e.to_string()))?;
        let generation = self.generation + 1;
        let preview = self.cache.create(path, &bytes, generation)?;
        self.generation = generation;

        if let Some(previous) = self.current.take() {
            previous.preview.release();
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        tracing::info!("🖼️  Selected {} ({} bytes)", file_name, bytes.len());
        tracing::debug!("Preview at {}", preview.uri());

        Ok(&*self.current.insert(SelectedImage {
            path: path.to_path_buf(),
            file_name,
            mime: preview::mime_for(path),
            preview,
        }))
    }

    /// Release the active selection (teardown)
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.preview.release();
        }
    }
}
