use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use chessboy::core::{Cli, CorePlugin, WindowConfig};
use chessboy::game::GamePlugin;
use chessboy::rendering::BoardPlugin;
use chessboy::ui::UiPlugin;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    let window_config = WindowConfig::default();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window_config.to_window()),
                    ..default()
                })
                .set(LogPlugin {
                    filter: cli.log_filter.clone(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin::default())
        // Order matters: bus handlers run in the order plugins subscribe them
        .add_plugins(CorePlugin {
            settings_path: cli.settings_path(),
            window: window_config,
        })
        .add_plugins(GamePlugin)
        .add_plugins(BoardPlugin)
        .add_plugins(UiPlugin)
        .run();
}
