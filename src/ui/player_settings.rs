//! Player settings panel
//!
//! Chooses who plays each colour: a human `Player` or one of the engines
//! configured in the preferences. The choice is only recorded; no engine
//! process is started.

use crate::core::EnginePreferences;
use crate::rendering::camera::BoardInsets;
use crate::rendering::pieces::PieceColor;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Seat {
    #[default]
    Player,
    /// Name of an engine in [`EnginePreferences`]
    Engine(String),
}

impl Seat {
    pub fn label(&self) -> &str {
        match self {
            Seat::Player => "Player",
            Seat::Engine(name) => name,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSeats {
    pub white: Seat,
    pub black: Seat,
}

impl PlayerSeats {
    pub fn seat(&self, color: PieceColor) -> &Seat {
        match color {
            PieceColor::White => &self.white,
            PieceColor::Black => &self.black,
        }
    }

    pub fn seat_mut(&mut self, color: PieceColor) -> &mut Seat {
        match color {
            PieceColor::White => &mut self.white,
            PieceColor::Black => &mut self.black,
        }
    }

    /// Put every seat whose engine is no longer configured back to `Player`.
    /// Returns how many seats changed.
    pub fn retain_known(&mut self, preferences: &EnginePreferences) -> usize {
        let mut released = 0;
        for seat in [&mut self.white, &mut self.black] {
            if let Seat::Engine(name) = seat {
                if !preferences.contains(name) {
                    *seat = Seat::Player;
                    released += 1;
                }
            }
        }
        released
    }
}

/// Keep the seats consistent with the engine list
pub fn release_removed_engines(preferences: Res<EnginePreferences>, mut seats: ResMut<PlayerSeats>) {
    // Only write through ResMut when something actually changes
    let stale = [PieceColor::White, PieceColor::Black]
        .into_iter()
        .any(|color| matches!(seats.seat(color), Seat::Engine(name) if !preferences.contains(name)));
    if stale {
        let released = seats.retain_known(&preferences);
        info!("[PLAYERS] {} seat(s) returned to Player", released);
    }
}

/// Left-hand panel with one combo box per colour
pub fn player_settings_ui(
    mut contexts: EguiContexts,
    preferences: Res<EnginePreferences>,
    mut seats: ResMut<PlayerSeats>,
    mut insets: ResMut<BoardInsets>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let panel = egui::SidePanel::left("player_settings")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Players");
            ui.separator();

            for color in [PieceColor::White, PieceColor::Black] {
                ui.label(color.name());
                let current = seats.seat(color).clone();
                let mut selected = current.clone();
                egui::ComboBox::from_id_salt(("seat", color.name()))
                    .selected_text(selected.label().to_string())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut selected, Seat::Player, "Player");
                        for engine in preferences.engines() {
                            ui.selectable_value(
                                &mut selected,
                                Seat::Engine(engine.name.clone()),
                                engine.name.as_str(),
                            );
                        }
                    });
                if selected != current {
                    info!("[PLAYERS] {} is now {}", color.name(), selected.label());
                    *seats.seat_mut(color) = selected;
                }
                ui.add_space(8.0);
            }
        });

    let left = panel.response.rect.width();
    if insets.left != left {
        insets.left = left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineDefinition;

    fn preferences(names: &[&str]) -> EnginePreferences {
        let mut preferences = EnginePreferences::default();
        for name in names {
            preferences
                .add(EngineDefinition::new(*name, format!("/usr/bin/{}", name)))
                .unwrap();
        }
        preferences
    }

    #[test]
    fn test_default_seats_are_players() {
        let seats = PlayerSeats::default();
        assert_eq!(seats.seat(PieceColor::White), &Seat::Player);
        assert_eq!(seats.seat(PieceColor::Black).label(), "Player");
    }

    #[test]
    fn test_removed_engine_falls_back_to_player() {
        let mut seats = PlayerSeats {
            white: Seat::Engine("stockfish".into()),
            black: Seat::Engine("crafty".into()),
        };
        let released = seats.retain_known(&preferences(&["crafty"]));

        assert_eq!(released, 1);
        assert_eq!(seats.white, Seat::Player);
        assert_eq!(seats.black, Seat::Engine("crafty".into()));
    }

    #[test]
    fn test_release_system_leaves_valid_seats_untouched() {
        use bevy::ecs::system::RunSystemOnce;

        let mut world = World::new();
        world.insert_resource(preferences(&["stockfish"]));
        world.insert_resource(PlayerSeats {
            white: Seat::Engine("stockfish".into()),
            black: Seat::Player,
        });
        world.run_system_once(release_removed_engines).unwrap();
        assert_eq!(world.resource::<PlayerSeats>().white, Seat::Engine("stockfish".into()));

        world.insert_resource(preferences(&[]));
        world.run_system_once(release_removed_engines).unwrap();
        assert_eq!(world.resource::<PlayerSeats>().white, Seat::Player);
    }
}
