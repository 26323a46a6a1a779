//! Top bar
//!
//! New Game and Preferences buttons, plus the side to move and the game
//! status reported by the rules library.
//!
//! Runs in `EguiPrimaryContextPass` before the side panels so egui lays the
//! bar out across the full window width.

use super::preferences::PreferencesDialog;
use super::styles::{turn_color, UiColors};
use crate::game::{new_game, ChessGame, GameStatus};
use crate::rendering::camera::BoardInsets;
use crate::rendering::pieces::PieceColor;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

fn status_color(status: GameStatus) -> egui::Color32 {
    match status {
        GameStatus::Check => UiColors::DANGER,
        GameStatus::Checkmate => UiColors::ACCENT_GOLD,
        GameStatus::Stalemate | GameStatus::Draw => UiColors::WARNING,
        GameStatus::Playing => UiColors::TEXT_SECONDARY,
    }
}

pub fn top_bar_ui(
    mut contexts: EguiContexts,
    mut game: ResMut<ChessGame>,
    mut dialog: ResMut<PreferencesDialog>,
    mut insets: ResMut<BoardInsets>,
    mut commands: Commands,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let panel = egui::TopBottomPanel::top("game_top_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("New Game").clicked() {
                    new_game(&mut game, &mut commands);
                }
                if ui.button("Preferences").clicked() {
                    dialog.open();
                }

                ui.separator();

                let side = game.side_to_move();
                let status = game.status();
                if !matches!(status, GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw) {
                    ui.colored_label(
                        turn_color(side == PieceColor::White),
                        egui::RichText::new(format!("{} to move", side.name())).size(16.0),
                    );
                }
                if let Some(label) = status.label() {
                    ui.colored_label(status_color(status), egui::RichText::new(label).strong());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(UiColors::TEXT_TERTIARY, format!("Ply {}", game.ply()));
                });
            });
            ui.add_space(5.0);
        });

    let top = panel.response.rect.height();
    if insets.top != top {
        insets.top = top;
    }
}
