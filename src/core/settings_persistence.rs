//! Settings persistence system
//!
//! Saves and loads [`EnginePreferences`] to/from a JSON file.
//!
//! # File Location
//!
//! Settings are stored in `settings.json` in the user's configuration
//! directory, unless a path is given on the command line (`--settings`).
//!
//! # Error Handling
//!
//! - A missing file means "no engines configured" and is not an error
//! - Read/parse failures at startup are logged and fall back to defaults
//! - Saving only happens on an explicit request from the preferences dialog

use crate::core::error::CoreResult;
use crate::core::EnginePreferences;
use bevy::prelude::*;
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resource holding the path preferences are read from and written to
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SettingsPath(pub PathBuf);

impl Default for SettingsPath {
    fn default() -> Self {
        Self(default_settings_path())
    }
}

/// Returns a path to `settings.json` in the user's configuration directory.
/// Falls back to local "settings.json" if the system config dir cannot be found.
pub fn default_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "chessboy", "ChessBoy") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Read preferences from `path`. A missing file yields empty preferences.
pub fn load_preferences(path: &Path) -> CoreResult<EnginePreferences> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("[SETTINGS] No settings file at {}", path.display());
            return Ok(EnginePreferences::default());
        }
        Err(e) => return Err(e.into()),
    };
    Ok(EnginePreferences::from_json(&contents)?)
}

/// Write preferences to `path`, creating the parent directory if needed
pub fn save_preferences(path: &Path, preferences: &EnginePreferences) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = preferences.to_json()?;
    tracing::debug!("[SETTINGS] Writing {} bytes to {}", json.len(), path.display());
    fs::write(path, json)?;
    Ok(())
}

/// Load preferences on startup
///
/// Always inserts an [`EnginePreferences`] resource; failures are logged and
/// replaced by the defaults so the board stays usable.
pub fn load_preferences_system(mut commands: Commands, settings_path: Res<SettingsPath>) {
    let path = &settings_path.0;
    let preferences = match load_preferences(path) {
        Ok(preferences) => {
            info!(
                "[SETTINGS] Loaded {} engine(s) from {:?}",
                preferences.len(),
                path
            );
            preferences
        }
        Err(e) => {
            warn!("[SETTINGS] Failed to load settings at {:?}: {}. Using defaults.", path, e);
            EnginePreferences::default()
        }
    };
    commands.insert_resource(preferences);
}
