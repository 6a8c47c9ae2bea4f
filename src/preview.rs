/// Local preview generation for selected images
///
/// A preview is a downscaled PNG written to the preview cache directory.
/// It is owned by exactly one selection and deleted when released.
use base64::Engine;
use iced::widget::image::Handle;
use image::{imageops::FilterType, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::selection::SelectError;

/// Longest edge of generated previews
const PREVIEW_SIZE: u32 = 512;

/// File extensions offered by the picker and accepted by selection
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff"];

/// Check the advisory image filter for a path
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type sent with the upload, derived from the extension
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Owned preview resource. Dropping it deletes the cached file.
#[derive(Debug)]
pub struct Preview {
    path: PathBuf,
    handle: Handle,
}

impl Preview {
    /// Local URI of the preview file
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image handle for the preview widget
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Release the preview explicitly (supersession or teardown)
    pub fn release(self) {
        // Drop does the work
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("🧹 Released preview {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to release preview {}: {}", self.path.display(), e),
        }
    }
}

/// Writes previews into a cache directory
#[derive(Debug, Clone)]
pub struct PreviewCache {
    dir: PathBuf,
}

impl PreviewCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Preview location for a source file at a given selection generation
    pub fn path_for(&self, source: &Path, generation: u64) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        self.dir.join(format!("{generation:06}-{stem}.png"))
    }

    /// Decode the image bytes and write a downscaled preview
    pub fn create(&self, source: &Path, bytes: &[u8], generation: u64) -> Result<Preview, SelectError> {
        let img = image::load_from_memory(bytes).map_err(|e| SelectError::Decode(e.to_string()))?;

        let preview = if img.width() > PREVIEW_SIZE || img.height() > PREVIEW_SIZE {
            img.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Lanczos3)
        } else {
            img
        };

        fs::create_dir_all(&self.dir).map_err(|e| SelectError::PreviewWrite(e.to_string()))?;

        let path = self.path_for(source, generation);
        preview
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| SelectError::PreviewWrite(e.to_string()))?;

        tracing::debug!("📸 Generated preview: {}", path.display());

        Ok(Preview {
            handle: Handle::from_path(&path),
            path,
        })
    }
}

/// Decode an image carried as a data URI or as bare base64
pub fn decode_data_uri(data: &str) -> Option<Vec<u8>> {
    let payload = match data.strip_prefix("data:") {
        Some(rest) => {
            let (meta, payload) = rest.split_once(',')?;
            if !meta.ends_with(";base64") {
                return None;
            }
            payload
        }
        None => data,
    };

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .ok()
        .filter(|bytes| !bytes.is_empty())
}
