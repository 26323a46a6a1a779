//! Board rendering module
//!
//! Square backdrop, piece placement and resynchronization with the game.

pub mod board;

pub use board::*;
