//! Persistence for user shortcut overrides.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-compliant path helpers (`overrides_path`, `config_dir`)
//!
//! The file stores only the action→shortcut pairs the user has changed from
//! the defaults; the keybinding engine seeds its registry from this map at
//! startup and hands back the map to save after each committed change.

use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// User shortcut overrides, keyed by action id.
///
/// Values are canonical shortcut strings as produced by the keybinding
/// engine (e.g. "Ctrl+Shift+B"). Entries for unknown actions or malformed
/// shortcuts are tolerated here and skipped by the engine when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutOverrides {
    /// Map of action id to canonical shortcut string
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

impl ShortcutOverrides {
    /// Create an empty overrides map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from the default path, or return an empty map if the
    /// file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::overrides_path())
    }

    /// Load overrides from an explicit path.
    ///
    /// A missing file is not an error; it simply means the user has never
    /// changed a shortcut.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Shortcut overrides file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading shortcut overrides from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let overrides: ShortcutOverrides =
            serde_yaml_ng::from_str(&contents).map_err(ConfigError::Parse)?;

        log::info!("Loaded {} shortcut override(s)", overrides.bindings.len());
        Ok(overrides)
    }

    /// Save overrides to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::overrides_path())
    }

    /// Save overrides to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Parse)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::Io)?;
        fs::rename(&temp_path, path).map_err(ConfigError::Io)?;

        log::debug!("Saved {} shortcut override(s) to {:?}", self.bindings.len(), path);
        Ok(())
    }

    /// Get the shortcut overrides file path (using XDG convention).
    pub fn overrides_path() -> PathBuf {
        Self::config_dir().join("shortcuts.yaml")
    }

    /// Get the configuration directory path (using XDG convention).
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("medley")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/medley/
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("medley")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
