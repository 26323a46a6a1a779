//! Core module - application infrastructure
//!
//! - [`event_bus`] - Synchronous publish/subscribe channels between panels
//! - [`resources`] - Engine preferences model
//! - [`settings_persistence`] - JSON persistence of the preferences
//! - [`window_config`] - Primary window configuration
//! - [`cli`] - Command-line options
//! - [`error`] - Error types

pub mod cli;
pub mod error;
pub mod event_bus;
pub mod plugin;
pub mod resources;
pub mod settings_persistence;
pub mod window_config;

// Re-export commonly used items
pub use cli::Cli;
pub use error::{CoreError, CoreResult, PreferencesError};
pub use event_bus::{BusError, BusEvent, Channel, EventBusCommandsExt, EventBusWorldExt, Subscription};
pub use plugin::CorePlugin;
pub use resources::*;
pub use settings_persistence::SettingsPath;
pub use window_config::WindowConfig;
