//! Persisted user settings for the instance manager.
//!
//! The instance id, AWS profile, and region are stored as a small JSON
//! file in the user's home directory and loaded once at startup. Saving
//! only happens on the explicit Save action; the last writer wins.
//!
//! Earlier releases stored just the instance id as a single line in
//! `~/.aws_instance_id`. That file is still read as a fallback when the
//! JSON file does not exist, so upgrading keeps the saved id.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the JSON settings file in the home directory.
const SETTINGS_FILE: &str = ".ec2dash.json";

/// File name of the legacy single-line instance id file.
const LEGACY_FILE: &str = ".aws_instance_id";

/// User settings persisted between sessions.
///
/// All fields default to the empty string when absent, both for a missing
/// file and for individual missing keys in an older settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Id of the managed EC2 instance (e.g. "i-0abc123def456").
    pub instance_id: String,
    /// Named AWS profile used to authenticate. Empty means the SDK's
    /// default profile resolution.
    pub profile: String,
    /// AWS region the instance lives in. Empty defers to the profile.
    pub region: String,
}

impl Settings {
    /// Path of the settings file, or None when no home directory exists.
    pub fn settings_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(SETTINGS_FILE))
    }

    fn legacy_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(LEGACY_FILE))
    }

    /// Load settings from the home directory.
    ///
    /// An absent file yields all-default values. A malformed file is
    /// reported and also treated as defaults rather than an error.
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_with_fallback(&path, Self::legacy_path().as_deref()),
            None => {
                warn!("No home directory found, starting with default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to a legacy single-line instance id
    /// file when the settings file does not exist.
    pub fn load_with_fallback(path: &Path, legacy: Option<&Path>) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }

        if let Some(legacy_path) = legacy {
            if legacy_path.exists() {
                match std::fs::read_to_string(legacy_path) {
                    Ok(contents) => {
                        info!("Migrating instance id from legacy file {:?}", legacy_path);
                        return Settings {
                            instance_id: contents.trim().to_string(),
                            ..Default::default()
                        };
                    }
                    Err(e) => {
                        warn!("Failed to read legacy file {:?}: {}", legacy_path, e);
                    }
                }
            }
        }

        Self::default()
    }

    /// Load settings from a specific file path.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    info!(
                        "Loaded settings: instance_id={}, profile={}, region={}",
                        settings.instance_id, settings.profile, settings.region
                    );
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                if path.exists() {
                    warn!("Failed to read settings file {:?}: {}", path, e);
                }
                Self::default()
            }
        }
    }

    /// Save settings to the home directory.
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("no home directory to save settings into")?;
        self.save_to(&path)
    }

    /// Save settings to a specific file path.
    ///
    /// The file is replaced atomically: the JSON is written to a temp
    /// file next to the target and renamed over it.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)
            .with_context(|| format!("failed to write settings to {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to move settings into place at {:?}", path))?;

        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
