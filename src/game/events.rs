//! Bus channels shared by the board, the game controller and the panels
//!
//! | Channel          | Published by            | Subscribed by                  |
//! |------------------|-------------------------|--------------------------------|
//! | [`NewGame`]      | game controller         | board view, notation panel     |
//! | [`PieceLifted`]  | drag observers          | (diagnostics)                  |
//! | [`MoveAttempted`]| drag observers          | game controller                |
//! | [`MoveApplied`]  | game controller         | board view, notation panel     |
//! | [`PieceCreated`] | piece pool              | board view                     |

use crate::core::{BusEvent, EventBusWorldExt};
use crate::rendering::pieces::{PieceColor, PieceKind};
use bevy::prelude::*;
use shakmaty::uci::UciMove;
use shakmaty::Square;
use std::fmt;

/// The position was reset to the initial setup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NewGame;

impl BusEvent for NewGame {
    const CHANNEL: &'static str = "new_game";
}

/// A piece was picked up by the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceLifted {
    pub piece: Entity,
    pub square: Square,
}

impl BusEvent for PieceLifted {
    const CHANNEL: &'static str = "piece_lifted";
}

/// Origin and destination of a dragged piece, not yet checked for legality
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CandidateMove {
    pub from: Square,
    pub to: Square,
}

impl CandidateMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// UCI form built from the two square names, without a promotion piece
    pub fn uci(&self) -> UciMove {
        UciMove::Normal {
            from: self.from,
            to: self.to,
            promotion: None,
        }
    }
}

impl fmt::Display for CandidateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// A piece was dropped on a different square
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAttempted {
    pub candidate: CandidateMove,
}

impl BusEvent for MoveAttempted {
    const CHANNEL: &'static str = "move_attempted";
}

/// The rules library accepted and played a move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveApplied {
    pub uci: UciMove,
    /// Standard algebraic notation, with check/mate suffix
    pub san: String,
    /// Half-moves played so far, including this one
    pub ply: u32,
    /// Side that made the move
    pub mover: PieceColor,
}

impl BusEvent for MoveApplied {
    const CHANNEL: &'static str = "move_applied";
}

/// The piece pool spawned a new entity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceCreated {
    pub piece: Entity,
    pub kind: PieceKind,
}

impl BusEvent for PieceCreated {
    const CHANNEL: &'static str = "piece_created";
}

/// Create every channel above in `world`
pub fn add_game_channels(world: &mut World) {
    world.add_channel::<NewGame>();
    world.add_channel::<PieceLifted>();
    world.add_channel::<MoveAttempted>();
    world.add_channel::<MoveApplied>();
    world.add_channel::<PieceCreated>();
}
