//! Pointer input
//!
//! Piece dragging is handled by picking observers attached to each piece
//! entity; see [`drag`].

pub mod drag;

pub use drag::*;
