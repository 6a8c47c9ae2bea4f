/// Application configuration
///
/// The analysis endpoint is fixed for this client; only the per-user
/// locations (settings file, preview cache) depend on the platform.
use std::path::PathBuf;

/// Directory name used under the platform config and cache directories
pub const APP_DIR: &str = "scene-breakdown";

/// Default address of the local analysis service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where and how to submit images for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Scheme, host and port of the service
    pub base_url: String,
    /// Route of the analysis endpoint
    pub route: &'static str,
    /// Multipart field carrying the image binary
    pub field_name: &'static str,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            route: "/analyze",
            field_name: "file",
        }
    }
}

impl AnalyzerConfig {
    /// Point the client at another base address (local mocks)
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the analysis endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.route)
    }
}

/// Per-user file locations
///
/// - Linux: ~/.config/scene-breakdown/settings.json, ~/.cache/scene-breakdown/previews
/// - macOS: ~/Library/Application Support/scene-breakdown/..., ~/Library/Caches/scene-breakdown/...
/// - Windows: %APPDATA%\scene-breakdown\..., %LOCALAPPDATA%\scene-breakdown\...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub settings_file: PathBuf,
    pub preview_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the platform directories, falling back to the home directory
    /// and finally to the system temp directory.
    pub fn resolve() -> Self {
        let config_root = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);
        let cache_root = dirs::cache_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);

        Self {
            settings_file: config_root.join(APP_DIR).join("settings.json"),
            preview_dir: cache_root.join(APP_DIR).join("previews"),
        }
    }

    /// Place everything under a single root
    #[cfg(test)]
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            settings_file: root.join("settings.json"),
            preview_dir: root.join("previews"),
        }
    }
}
