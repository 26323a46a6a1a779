//! Error types for core module
//!
//! Provides custom error types for settings persistence and the engine
//! preferences model.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Rejected edit of the engine list
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}

/// Rejected edits of [`super::EnginePreferences`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferencesError {
    #[error("Engine name must not be empty")]
    EmptyName,

    #[error("An engine named `{0}` is already configured")]
    DuplicateName(String),

    #[error("No engine named `{0}` is configured")]
    UnknownEngine(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
