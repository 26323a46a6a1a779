//! UI module - Egui-based panels and dialogs
//!
//! - **game_ui**: Top bar with New Game, Preferences and the game status
//! - **player_settings**: Player or engine for each colour
//! - **notation**: Move list in algebraic notation
//! - **preferences**: Engine list editor with explicit Save
//!
//! Each panel reports its size in [`BoardInsets`] so the board camera can
//! keep the board clear of it.
//!
//! All panels draw in `EguiPrimaryContextPass`. Egui needs panels added
//! outside-in (top bar, then side panels, then floating windows), so the
//! systems are chained.

pub mod game_ui;
pub mod notation;
pub mod player_settings;
pub mod preferences;
pub mod styles;

pub use game_ui::*;
pub use notation::*;
pub use player_settings::*;
pub use preferences::*;

use crate::core::EnginePreferences;
use crate::rendering::camera::BoardInsets;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// UI plugin for Chessboy
///
/// Add after [`crate::rendering::BoardPlugin`]: the notation panel's bus
/// handlers must run after the board has resynchronized.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotationPanel>()
            .init_resource::<PlayerSeats>()
            .init_resource::<PreferencesDialog>()
            .init_resource::<BoardInsets>();

        subscribe_notation_panel(app.world_mut());

        app.add_systems(
            Update,
            release_removed_engines.run_if(resource_exists_and_changed::<EnginePreferences>),
        )
        .add_systems(
            EguiPrimaryContextPass,
            (
                top_bar_ui,
                player_settings_ui,
                notation_panel_ui,
                preferences_dialog_ui,
            )
                .chain(),
        );
    }
}
