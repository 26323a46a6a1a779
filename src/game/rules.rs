//! Rules adapter over `shakmaty`
//!
//! [`ChessGame`] is the only place the position lives. The board view reads
//! it to place pieces and the game controller asks it to play dragged moves;
//! neither duplicates any legality logic.

use super::events::{CandidateMove, MoveApplied};
use crate::rendering::pieces::{PieceColor, PieceKind};
use bevy::prelude::*;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Move, Position, Rank, Role, Square};

/// Coarse state of the game for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
    Stalemate,
    /// Insufficient material
    Draw,
}

impl GameStatus {
    pub fn label(self) -> Option<&'static str> {
        match self {
            GameStatus::Playing => None,
            GameStatus::Check => Some("Check"),
            GameStatus::Checkmate => Some("Checkmate"),
            GameStatus::Stalemate => Some("Stalemate"),
            GameStatus::Draw => Some("Draw"),
        }
    }
}

/// Resource holding the authoritative position and the moves played
#[derive(Resource, Debug, Clone, Default)]
pub struct ChessGame {
    position: Chess,
    played: Vec<UciMove>,
}

impl ChessGame {
    /// Start from an arbitrary position instead of the initial setup
    pub fn from_position(position: Chess) -> Self {
        Self {
            position,
            played: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Moves played since the last reset, in UCI form
    pub fn played(&self) -> &[UciMove] {
        &self.played
    }

    /// Half-moves played since the last reset
    pub fn ply(&self) -> u32 {
        self.played.len() as u32
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.position.turn().into()
    }

    /// Every occupied square with the piece standing on it
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceKind)> + '_ {
        let board = self.position.board();
        Square::ALL
            .into_iter()
            .filter_map(move |square| board.piece_at(square).map(|piece| (square, piece.into())))
    }

    pub fn status(&self) -> GameStatus {
        let position = &self.position;
        if position.is_checkmate() {
            GameStatus::Checkmate
        } else if position.is_stalemate() {
            GameStatus::Stalemate
        } else if position.is_insufficient_material() {
            GameStatus::Draw
        } else if position.is_check() {
            GameStatus::Check
        } else {
            GameStatus::Playing
        }
    }

    /// Turn a candidate into a legal move, if the rules library allows it
    ///
    /// A pawn dropped on the last rank carries no promotion piece, so it is
    /// tried again as a queen promotion.
    pub fn resolve(&self, candidate: CandidateMove) -> Option<Move> {
        if let Ok(m) = candidate.uci().to_move(&self.position) {
            return Some(m);
        }
        if !self.reaches_last_rank_with_pawn(candidate) {
            return None;
        }
        let promotion = UciMove::Normal {
            from: candidate.from,
            to: candidate.to,
            promotion: Some(Role::Queen),
        };
        promotion.to_move(&self.position).ok()
    }

    /// Play `candidate` if legal. Illegal candidates leave the game untouched.
    pub fn try_apply(&mut self, candidate: CandidateMove) -> Option<MoveApplied> {
        let m = self.resolve(candidate)?;
        let mover = self.side_to_move();
        let uci = m.to_uci(CastlingMode::Standard);
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, m);
        self.played.push(uci.clone());

        Some(MoveApplied {
            uci,
            san: san.to_string(),
            ply: self.ply(),
            mover,
        })
    }

    fn reaches_last_rank_with_pawn(&self, candidate: CandidateMove) -> bool {
        self.position.board().role_at(candidate.from) == Some(Role::Pawn)
            && matches!(candidate.to.rank(), Rank::First | Rank::Eighth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;

    fn game_from_fen(fen: &str) -> ChessGame {
        let fen: Fen = fen.parse().unwrap();
        ChessGame::from_position(fen.into_position(CastlingMode::Standard).unwrap())
    }

    fn play(game: &mut ChessGame, from: Square, to: Square) -> MoveApplied {
        game.try_apply(CandidateMove::new(from, to))
            .unwrap_or_else(|| panic!("{}{} should be legal", from, to))
    }

    #[test]
    fn test_initial_position_has_32_pieces() {
        let game = ChessGame::default();
        assert_eq!(game.occupied().count(), 32);
        assert_eq!(game.side_to_move(), PieceColor::White);
        assert_eq!(game.ply(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_legal_move_is_applied_with_san() {
        let mut game = ChessGame::default();
        let applied = play(&mut game, Square::E2, Square::E4);

        assert_eq!(applied.san, "e4");
        assert_eq!(applied.uci.to_string(), "e2e4");
        assert_eq!(applied.ply, 1);
        assert_eq!(applied.mover, PieceColor::White);
        assert_eq!(game.side_to_move(), PieceColor::Black);
    }

    #[test]
    fn test_illegal_move_is_dropped() {
        let mut game = ChessGame::default();
        assert!(game.try_apply(CandidateMove::new(Square::E2, Square::E5)).is_none());
        assert!(game.try_apply(CandidateMove::new(Square::E7, Square::E5)).is_none());
        assert_eq!(game.ply(), 0);
        assert_eq!(game.position().board(), Chess::default().board());
    }

    #[test]
    fn test_pawn_on_last_rank_promotes_to_queen() {
        let mut game = game_from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1");
        let applied = play(&mut game, Square::A7, Square::A8);

        assert_eq!(applied.san, "a8=Q+");
        assert_eq!(applied.uci.to_string(), "a7a8q");
        assert_eq!(game.status(), GameStatus::Check);
    }

    #[test]
    fn test_king_two_squares_castles() {
        let mut game = game_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let applied = play(&mut game, Square::E1, Square::G1);
        assert_eq!(applied.san, "O-O");
    }

    #[test]
    fn test_scholars_mate_status() {
        let mut game = ChessGame::default();
        play(&mut game, Square::E2, Square::E4);
        play(&mut game, Square::E7, Square::E5);
        play(&mut game, Square::D1, Square::H5);
        play(&mut game, Square::B8, Square::C6);
        play(&mut game, Square::F1, Square::C4);
        play(&mut game, Square::G8, Square::F6);
        let mate = play(&mut game, Square::H5, Square::F7);

        assert_eq!(mate.san, "Qxf7#");
        assert_eq!(mate.ply, 7);
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.occupied().count(), 31);
    }

    #[test]
    fn test_reset_restores_initial_position() {
        let mut game = ChessGame::default();
        play(&mut game, Square::G1, Square::F3);
        game.reset();
        assert_eq!(game.ply(), 0);
        assert_eq!(game.position().board(), Chess::default().board());
    }
}
