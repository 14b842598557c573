//! Editor configuration for polar-designer
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/polar-designer/config.yaml

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use polar_core::{config, MAX_BANDS};

/// File name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Shortest accepted engine poll period
const MIN_POLL_INTERVAL_MS: u64 = 5;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// Initial window size
    pub window: WindowConfig,
    /// Period of the engine flag poll (milliseconds)
    pub poll_interval_ms: u64,
    /// Band count of the in-process engine at startup (1-5)
    pub initial_band_count: usize,
    /// Directory of the last loaded or saved preset
    pub last_preset_dir: Option<PathBuf>,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            poll_interval_ms: 30,
            initial_band_count: MAX_BANDS,
            last_preset_dir: None,
        }
    }
}

impl DesignerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Startup band count, clamped to what the engine supports
    pub fn band_count(&self) -> usize {
        self.initial_band_count.clamp(1, MAX_BANDS)
    }
}

/// Window configuration section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
        }
    }
}

/// `~/.config/polar-designer/config.yaml`
pub fn default_config_path() -> PathBuf {
    config::default_config_path(CONFIG_FILE_NAME)
}

/// Load the config, falling back to defaults when missing or invalid
pub fn load_config(path: &Path) -> DesignerConfig {
    config::load_config(path)
}

pub fn save_config(config: &DesignerConfig, path: &Path) -> Result<()> {
    config::save_config(config, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DesignerConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(30));
        assert_eq!(config.band_count(), MAX_BANDS);
        assert!(config.last_preset_dir.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("missing.yaml"));
        assert_eq!(config, DesignerConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "initial_band_count: 3\nwindow:\n  width: 1280.0\n").unwrap();

        let config = load_config(&path);
        assert_eq!(config.band_count(), 3);
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.window.height, WindowConfig::default().height);
        assert_eq!(config.poll_interval_ms, 30);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "poll_interval_ms: [not, a, number]").unwrap();
        assert_eq!(load_config(&path), DesignerConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = DesignerConfig {
            last_preset_dir: Some(PathBuf::from("/tmp/presets")),
            initial_band_count: 2,
            ..Default::default()
        };

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path), config);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = DesignerConfig {
            poll_interval_ms: 0,
            initial_band_count: 9,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));
        assert_eq!(config.band_count(), MAX_BANDS);
    }
}
