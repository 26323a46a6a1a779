//! Chess pieces rendering module
//!
//! Piece kinds, the piece component and the entity pool behind them.

pub mod pieces;
pub mod pool;

// Re-export all public items
pub use pieces::*;
pub use pool::*;
