//! Settings
//!
//! User settings live in `<config dir>/orvian/settings.ron`. Every field is
//! optional in the file; a missing file means all defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::editor::{SkyMode, ViewPrefs};

/// Directory name under the platform config/data directories
pub const APP_DIR: &str = "orvian";

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },

    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the key-value storage files go; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub grid_visible: bool,
    pub grid_size: f64,
    pub sky_mode: SkyMode,
}

impl Default for Settings {
    fn default() -> Self {
        let view = ViewPrefs::default();
        Self {
            data_dir: None,
            grid_visible: view.grid_visible,
            grid_size: view.grid_size,
            sky_mode: view.sky_mode,
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_ron(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Write settings as pretty RON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let ron_string = ron::ser::to_string_pretty(self, config)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, ron_string)?;
        Ok(())
    }

    /// Storage directory: the configured one, else the platform data dir
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }

    /// Initial view preferences for a session
    pub fn view_prefs(&self) -> ViewPrefs {
        ViewPrefs {
            grid_visible: self.grid_visible,
            grid_size: self.grid_size,
            sky_mode: self.sky_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.ron")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.view_prefs(), ViewPrefs::default());
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_ron("(grid_size: 2.5, sky_mode: night)").unwrap();
        assert_eq!(settings.grid_size, 2.5);
        assert_eq!(settings.sky_mode, SkyMode::Night);
        assert!(settings.grid_visible);
        assert_eq!(settings.data_dir, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.ron");
        let settings = Settings {
            data_dir: Some(dir.path().join("data")),
            grid_visible: false,
            grid_size: 0.5,
            sky_mode: SkyMode::Night,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        assert_eq!(settings.resolved_data_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "this is not ron (").unwrap();
        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
    }
}
