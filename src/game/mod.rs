//! Chess game module
//!
//! - [`events`] - Bus channels and the candidate move type
//! - [`rules`] - [`ChessGame`], the adapter over the rules library
//! - [`plugin`] - [`GamePlugin`], the game controller

pub mod events;
pub mod plugin;
pub mod rules;

// Re-export the plugin and the main resources
pub use events::*;
pub use plugin::{new_game, GamePlugin};
pub use rules::{ChessGame, GameStatus};
