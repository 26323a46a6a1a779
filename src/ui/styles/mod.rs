//! UI styling for Chessboy
//!
//! Shared colors for the panels and dialogs.

pub mod colors;

pub use colors::*;
