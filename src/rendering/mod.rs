//! Rendering module - 2D chess board with Bevy sprites
//!
//! # Architecture
//!
//! - `board` - Square sprites, [`BoardPlugin`], resynchronization
//! - `camera` - Orthographic board camera, fit-to-window scaling
//! - `pieces` - Piece kinds and the reusable piece pool
//! - `utils` - Board geometry (square <-> world mapping)
//!
//! Pieces and squares are plain `Sprite`s. Squares ignore picking so that
//! pointer events reach the pieces above them.

pub mod board;
pub mod camera;
pub mod pieces;
pub mod utils;

// Re-export commonly used items
pub use board::*;
pub use camera::*;
pub use pieces::*;
pub use utils::*;
