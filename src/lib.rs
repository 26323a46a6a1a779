//! Chessboy - a 2D chess board with drag-and-drop moves
//!
//! Game rules come from `shakmaty`; this crate renders the position with
//! Bevy sprites and wires the panels together through the event bus in
//! [`core::event_bus`].

pub mod assets;
pub mod core;
pub mod game;
pub mod input;
pub mod rendering;
pub mod ui;
