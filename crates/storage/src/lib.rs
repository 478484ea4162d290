//! Viewer preference persistence
//!
//! Preferences are ambient configuration (default tool, annotation color,
//! pan feel), stored as versioned JSON under the platform-local data dir.
//! Annotations themselves are deliberately not persisted here.

use directories::ProjectDirs;
use redline_core::Color;
use redline_viewer::ToolMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PREFS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unable to resolve local data directory")]
    NoDataDirectory,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerPreferences {
    pub default_tool: ToolMode,
    pub annotation_color: Color,
    /// Use 1:1 pan tracking without holding the fine-pan modifier.
    pub fine_pan_smoothing: bool,
}

impl Default for ViewerPreferences {
    fn default() -> Self {
        Self {
            default_tool: ToolMode::Cursor,
            annotation_color: Color::SHAPE_RED,
            fine_pan_smoothing: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PreferencesEnvelope {
    version: u32,
    preferences: ViewerPreferences,
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn from_default_project() -> Result<Self, StorageError> {
        let dirs =
            ProjectDirs::from("dev", "Redline", "Redline").ok_or(StorageError::NoDataDirectory)?;
        Ok(Self { root: dirs.data_local_dir().to_path_buf() })
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Missing file means defaults, not an error.
    pub fn load_preferences(&self) -> Result<ViewerPreferences, StorageError> {
        let path = self.preferences_path();
        if !path.exists() {
            return Ok(ViewerPreferences::default());
        }

        let bytes = fs::read(path)?;
        let envelope: PreferencesEnvelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.preferences)
    }

    pub fn save_preferences(&self, preferences: &ViewerPreferences) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;

        let envelope =
            PreferencesEnvelope { version: PREFS_SCHEMA_VERSION, preferences: preferences.clone() };
        let bytes = serde_json::to_vec_pretty(&envelope)?;
        fs::write(self.preferences_path(), bytes)?;
        Ok(())
    }

    fn preferences_path(&self) -> PathBuf {
        self.root.join("preferences.json")
    }
}
