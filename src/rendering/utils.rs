//! Board geometry - square <-> world mapping
//!
//! The board lies in the XY plane, a1 in the bottom-left corner. Square
//! indices follow `index = file + 8 * rank`, so a1 = 0 and h8 = 63.
//!
//! World position of a square is the centre of its tile:
//!
//! ```text
//! center(file, rank) = origin + (file + 0.5, rank + 0.5) * tile_size
//! ```
//!
//! and the inverse is plain integer division of the offset from the origin.
//! Anything outside the 8x8 area maps to `None`.

use bevy::prelude::*;
use shakmaty::Square;

/// Edge length of one square, in world units (the square images are 256px)
pub const TILE_SIZE: f32 = 256.0;

/// Space kept around the board when fitting it to the window
pub const BOARD_PADDING: f32 = 100.0;

/// Draw order
pub const SQUARE_Z: f32 = 0.0;
pub const PIECE_Z: f32 = 1.0;
pub const LIFTED_Z: f32 = 2.0;

/// Marker for the 64 backdrop sprites
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSquare(pub Square);

/// Placement of the board in world space
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub tile_size: f32,
    /// World position of the outer corner of a1
    pub origin: Vec2,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::centered(TILE_SIZE)
    }
}

impl BoardLayout {
    /// A board centred on the world origin
    pub fn centered(tile_size: f32) -> Self {
        Self {
            tile_size,
            origin: Vec2::splat(-4.0 * tile_size),
        }
    }

    /// Width (and height) of the whole board
    pub fn extent(&self) -> f32 {
        8.0 * self.tile_size
    }

    pub fn square_to_world(&self, square: Square) -> Vec2 {
        let index = square as u32;
        let file = (index % 8) as f32;
        let rank = (index / 8) as f32;
        self.origin + (Vec2::new(file, rank) + 0.5) * self.tile_size
    }

    pub fn world_to_square(&self, position: Vec2) -> Option<Square> {
        let local = (position - self.origin) / self.tile_size;
        if !(0.0..8.0).contains(&local.x) || !(0.0..8.0).contains(&local.y) {
            return None;
        }
        let file = local.x.floor() as u32;
        let rank = local.y.floor() as u32;
        Some(Square::new(file + 8 * rank))
    }
}

/// Light squares are those where file + rank is odd (h1 is light, a1 dark)
pub fn is_light_square(square: Square) -> bool {
    let index = square as u32;
    (index % 8 + index / 8) % 2 == 1
}

/// Zoom factor that fits a board of `board_extent` plus `padding` into the window
pub fn fit_to_window_scale(window: Vec2, board_extent: f32, padding: f32) -> f32 {
    window.x.min(window.y) / (board_extent + padding)
}
