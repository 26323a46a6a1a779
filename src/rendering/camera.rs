//! Board camera
//!
//! A single orthographic 2D camera looking at the board. Its projection and
//! position follow the primary window and the egui panels so the whole board
//! (plus a margin) stays visible in the uncovered area.

use super::utils::{fit_to_window_scale, BoardLayout, BOARD_PADDING};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

#[derive(Component, Debug, Default)]
pub struct BoardCamera;

pub fn spawn_board_camera(mut commands: Commands) {
    commands.spawn((Camera2d, BoardCamera, Name::new("Board Camera")));
    info!("[CAMERA] Board camera spawned");
}

/// Window area covered by egui panels, in logical pixels
///
/// Written by the UI every frame; the board is fitted into what is left.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct BoardInsets {
    pub top: f32,
    pub left: f32,
    pub right: f32,
}

impl BoardInsets {
    /// Size of the uncovered part of a window of size `window`
    pub fn available(&self, window: Vec2) -> Vec2 {
        (window - Vec2::new(self.left + self.right, self.top)).max(Vec2::ZERO)
    }
}

/// Camera zoom (world units per pixel) and position that show the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardFit {
    pub zoom: f32,
    pub center: Vec2,
}

/// Fit a board of `board_extent` into the part of the window the panels leave free
pub fn fit_board(window: Vec2, insets: &BoardInsets, board_extent: f32) -> Option<BoardFit> {
    let scale = fit_to_window_scale(insets.available(window), board_extent, BOARD_PADDING);
    if scale <= 0.0 || !scale.is_finite() {
        return None;
    }
    let zoom = 1.0 / scale;
    // Shift the camera so the board sits in the middle of the free area
    let center = Vec2::new(insets.right - insets.left, insets.top) * 0.5 * zoom;
    Some(BoardFit { zoom, center })
}

/// Keep the board fitted to the window and clear of the panels
pub fn fit_board_to_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    insets: Res<BoardInsets>,
    layout: Res<BoardLayout>,
    mut cameras: Query<(&mut Projection, &mut Transform), With<BoardCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(fit) = fit_board(
        Vec2::new(window.width(), window.height()),
        &insets,
        layout.extent(),
    ) else {
        return;
    };

    for (mut projection, mut transform) in &mut cameras {
        let rescale = matches!(
            projection.as_ref(),
            Projection::Orthographic(ortho) if (ortho.scale - fit.zoom).abs() > f32::EPSILON
        );
        if rescale {
            if let Projection::Orthographic(ortho) = projection.as_mut() {
                ortho.scale = fit.zoom;
            }
            debug!("[CAMERA] Board zoom {:.3}", fit.zoom);
        }
        if transform.translation.truncate().distance(fit.center) > f32::EPSILON {
            transform.translation.x = fit.center.x;
            transform.translation.y = fit.center.y;
        }
    }
}
