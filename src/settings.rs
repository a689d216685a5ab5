//! User settings.
//!
//! This module handles loading and saving the monitor's display preferences:
//! language, window preset and bucket count.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::SystemClock;
use crate::i18n::Language;
use crate::window::{Preset, TimeWindow, WindowError};

/// Errors that can occur while reading or writing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Platform has no config directory
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Language of weekday and date labels, the runtime locale when unset
    #[serde(default = "Language::from_env")]
    pub language: Language,
    /// Window shown on startup
    #[serde(default)]
    pub preset: Preset,
    /// Buckets per window
    #[serde(default = "default_bucket_count")]
    pub bucket_count: u32,
}

fn default_version() -> u32 {
    1
}

fn default_bucket_count() -> u32 {
    24
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            language: Language::from_env(),
            preset: Preset::default(),
            bucket_count: default_bucket_count(),
        }
    }
}

impl UserSettings {
    /// Get the config directory path
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("RuuviMonitor"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("RuuviMonitor"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("ruuvi-monitor"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::get_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Build the configured window on the system clock and local time zone
    pub fn window(&self) -> Result<TimeWindow, WindowError> {
        self.preset
            .window_with(self.bucket_count, Local, SystemClock, self.language.locale())
    }
}
