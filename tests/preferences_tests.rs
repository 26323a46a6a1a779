//! Integration tests for engine preferences persistence
//!
//! Runs `CorePlugin` against scratch settings files and checks what ends up
//! in the `EnginePreferences` resource.

use bevy::prelude::*;
use chessboy::core::settings_persistence::save_preferences;
use chessboy::core::{CorePlugin, EngineDefinition, EnginePreferences, SettingsPath};
use chessboy::ui::{release_removed_engines, PlayerSeats, PreferencesDialog, Seat};
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("chessboy-it-{}-{}", name, std::process::id()))
        .join("settings.json")
}

fn startup(path: PathBuf) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(CorePlugin {
        settings_path: SettingsPath(path),
        ..default()
    });
    app.update();
    app
}

#[test]
fn test_missing_file_means_no_engines() {
    let app = startup(scratch("missing"));
    assert!(app.world().resource::<EnginePreferences>().is_empty());
}

#[test]
fn test_malformed_file_is_treated_as_empty() {
    let path = scratch("malformed");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let app = startup(path.clone());
    assert!(app.world().resource::<EnginePreferences>().is_empty());

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_saved_engines_are_restored_in_order() {
    let path = scratch("roundtrip");
    let mut preferences = EnginePreferences::default();
    for name in ["stockfish", "crafty", "fairy"] {
        preferences
            .add(EngineDefinition::new(name, format!("/opt/{}/bin", name)))
            .unwrap();
    }
    save_preferences(&path, &preferences).unwrap();

    let app = startup(path.clone());
    assert_eq!(app.world().resource::<EnginePreferences>(), &preferences);

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_dialog_removal_releases_seat_and_saves() {
    let path = scratch("dialog");
    let mut preferences = EnginePreferences::default();
    preferences.add(EngineDefinition::new("stockfish", "/usr/bin/stockfish")).unwrap();
    save_preferences(&path, &preferences).unwrap();

    let mut app = startup(path.clone());
    app.insert_resource(PlayerSeats {
        white: Seat::Engine("stockfish".into()),
        black: Seat::Player,
    })
    .init_resource::<PreferencesDialog>()
    .add_systems(
        Update,
        release_removed_engines.run_if(resource_exists_and_changed::<EnginePreferences>),
    );

    let world = app.world_mut();
    world.resource_scope(|world, mut preferences: Mut<EnginePreferences>| {
        let mut dialog = world.resource_mut::<PreferencesDialog>();
        dialog.request_removal("stockfish");
        assert!(dialog.confirm_removal(&mut preferences).is_some());
        assert!(dialog.save(&path, &preferences));
    });
    app.update();

    assert_eq!(app.world().resource::<PlayerSeats>().white, Seat::Player);
    let reloaded = startup(path.clone());
    assert!(reloaded.world().resource::<EnginePreferences>().is_empty());

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}
