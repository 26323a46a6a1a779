//! Core plugin for Chessboy
//!
//! Provides fundamental application setup:
//! - Window configuration
//! - Settings path and engine preferences loading
//!
//! # Plugin Order
//!
//! Recommended plugin order:
//! 1. [`bevy::DefaultPlugins`] and [`bevy_egui::EguiPlugin`]
//! 2. [`CorePlugin`] - Foundation (configuration, preferences)
//! 3. [`crate::game::GamePlugin`] - Bus channels, rules, move application
//! 4. [`crate::rendering::BoardPlugin`] - Board, pieces, resynchronization
//! 5. [`crate::ui::UiPlugin`] - Panels and dialogs
//!
//! Bus handlers run in subscription order, and subscription happens while
//! plugins are built, so this order is also the delivery order.

use super::settings_persistence::{load_preferences_system, SettingsPath};
use super::window_config::apply_window_config;
use super::{EngineDefinition, EnginePreferences, WindowConfig};
use bevy::prelude::*;

/// Core plugin for Chessboy
#[derive(Default)]
pub struct CorePlugin {
    /// Where preferences live; defaults to the platform config directory
    pub settings_path: SettingsPath,
    /// Must match the config the primary window was built from
    pub window: WindowConfig,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.window.clone())
            .insert_resource(self.settings_path.clone());

        app.register_type::<WindowConfig>()
            .register_type::<EngineDefinition>()
            .register_type::<EnginePreferences>();

        // Preferences must exist before any Startup system or panel reads them
        app.add_systems(PreStartup, load_preferences_system)
            .add_systems(Update, apply_window_config.run_if(resource_changed::<WindowConfig>));
    }
}
