/// Persisted UI preferences
///
/// The theme flag lives in a small JSON settings file. It is read once at
/// startup and written back on every change. A missing or corrupt file
/// falls back to the dark theme.
use iced::Theme;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings key holding the theme flag
pub const DARK_MODE_KEY: &str = "dark_mode";

/// Theme used when nothing valid is stored
pub const DEFAULT_DARK: bool = true;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    dark: bool,
}

impl ThemeStore {
    /// Load the preference from disk
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dark = read_settings(&path)
            .and_then(|settings| settings.get(DARK_MODE_KEY).and_then(Value::as_bool))
            .unwrap_or(DEFAULT_DARK);

        tracing::debug!("🎨 Theme loaded from {}: dark={}", path.display(), dark);

        Self { path, dark }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Flip the theme and persist it. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.dark = !self.dark;

        if let Err(e) = self.save() {
            tracing::error!("Failed to save theme preference to {}: {}", self.path.display(), e);
        }

        self.dark
    }

    /// Presentation-layer theme for the current value
    pub fn theme(&self) -> Theme {
        if self.dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Write the flag, keeping any other keys already in the file
    fn save(&self) -> Result<(), SettingsError> {
        let mut settings = read_settings(&self.path).unwrap_or_default();
        settings.insert(DARK_MODE_KEY.to_string(), Value::Bool(self.dark));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(settings))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Settings object from disk, None if absent or not a JSON object
fn read_settings(path: &Path) -> Option<Map<String, Value>> {
    let text = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) | Err(_) => {
            tracing::warn!("⚠️  Ignoring unreadable settings file {}", path.display());
            None
        }
    }
}
