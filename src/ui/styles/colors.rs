//! Color palette for the Chessboy panels
//!
//! Colors are defined as egui::Color32 for direct use in UI code.

use bevy_egui::egui;

/// Primary UI color palette
pub struct UiColors;

impl UiColors {
    /// Primary text (headings, important text)
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(240, 240, 245);

    /// Secondary text (body text)
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(200, 200, 205);

    /// Tertiary text (move numbers, hints)
    pub const TEXT_TERTIARY: egui::Color32 = egui::Color32::from_rgb(150, 150, 155);

    /// Game over banner
    pub const ACCENT_GOLD: egui::Color32 = egui::Color32::from_rgb(218, 165, 32);

    pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(40, 180, 40);

    /// Stalemate, draw
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 150, 0);

    /// Check, errors
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);
}

/// Text color for the side to move
pub fn turn_color(white: bool) -> egui::Color32 {
    if white {
        UiColors::TEXT_PRIMARY
    } else {
        UiColors::TEXT_SECONDARY
    }
}
