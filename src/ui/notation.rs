//! Move notation panel
//!
//! Lists the game in standard algebraic notation, one line per full move:
//!
//! ```text
//! 1.  e4    e5
//! 2.  Nf3   Nc6
//! 3.  Bb5
//! ```
//!
//! Lines are driven by the ply count of each `MoveApplied`: after `ply`
//! half-moves the panel holds `ply / 2 + ply % 2` lines. A `NewGame` clears
//! the panel.

use super::styles::UiColors;
use crate::core::EventBusWorldExt;
use crate::game::events::{MoveApplied, NewGame};
use crate::rendering::camera::BoardInsets;
use crate::rendering::pieces::PieceColor;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// One full move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotationLine {
    pub number: u32,
    pub white: String,
    pub black: String,
}

/// Contents of the notation panel
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct NotationPanel {
    lines: Vec<NotationLine>,
}

impl NotationPanel {
    pub fn lines(&self) -> &[NotationLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Record the move that brought the game to `ply` half-moves
    pub fn record(&mut self, ply: u32, mover: PieceColor, san: &str) {
        if ply == 0 {
            return;
        }
        let needed = (ply / 2 + ply % 2) as usize;
        while self.lines.len() < needed {
            let number = self.lines.len() as u32 + 1;
            self.lines.push(NotationLine {
                number,
                ..default()
            });
        }

        let line = &mut self.lines[needed - 1];
        match mover {
            PieceColor::White => line.white = san.to_string(),
            PieceColor::Black => line.black = san.to_string(),
        }
    }

    /// The game as PGN-style movetext, e.g. `1. e4 e5 2. Nf3`
    pub fn movetext(&self) -> String {
        let mut parts = Vec::new();
        for line in &self.lines {
            if line.white.is_empty() && line.black.is_empty() {
                continue;
            }
            if line.white.is_empty() {
                parts.push(format!("{}...", line.number));
            } else {
                parts.push(format!("{}.", line.number));
                parts.push(line.white.clone());
            }
            if !line.black.is_empty() {
                parts.push(line.black.clone());
            }
        }
        parts.join(" ")
    }
}

fn record_applied_move(In(applied): In<MoveApplied>, mut panel: ResMut<NotationPanel>) {
    panel.record(applied.ply, applied.mover, &applied.san);
}

fn clear_on_new_game(In(_): In<NewGame>, mut panel: ResMut<NotationPanel>) {
    panel.clear();
}

pub fn subscribe_notation_panel(world: &mut World) {
    world.subscribe(clear_on_new_game);
    world.subscribe(record_applied_move);
}

/// Right-hand panel with the move list
pub fn notation_panel_ui(
    mut contexts: EguiContexts,
    panel: Res<NotationPanel>,
    mut insets: ResMut<BoardInsets>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let side = egui::SidePanel::right("notation_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(160.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Moves");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let copy = ui.add_enabled(!panel.lines().is_empty(), egui::Button::new("Copy"));
                    if copy.clicked() {
                        ui.ctx().copy_text(panel.movetext());
                        info!("[NOTATION] Copied {} moves", panel.lines().len());
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("notation_grid")
                        .num_columns(3)
                        .striped(true)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            for line in panel.lines() {
                                ui.colored_label(UiColors::TEXT_TERTIARY, format!("{}.", line.number));
                                ui.colored_label(UiColors::TEXT_PRIMARY, line.white.as_str());
                                ui.colored_label(UiColors::TEXT_PRIMARY, line.black.as_str());
                                ui.end_row();
                            }
                        });
                });
        });

    let right = side.response.rect.width();
    if insets.right != right {
        insets.right = right;
    }
}
