//! Chess piece kinds and the piece component
//!
//! A piece on screen is identified by one of twelve [`PieceKind`]s (type x
//! colour). Kinds map one-to-one onto FEN symbols and onto the sprite image
//! that draws them.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Default)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

impl From<shakmaty::Color> for PieceColor {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => PieceColor::White,
            shakmaty::Color::Black => PieceColor::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Default)]
pub enum PieceType {
    #[default]
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    pub fn name(self) -> &'static str {
        match self {
            PieceType::King => "King",
            PieceType::Queen => "Queen",
            PieceType::Bishop => "Bishop",
            PieceType::Knight => "Knight",
            PieceType::Rook => "Rook",
            PieceType::Pawn => "Pawn",
        }
    }

    /// Upper-case FEN letter
    fn letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Rook => 'R',
            PieceType::Pawn => 'P',
        }
    }
}

impl From<shakmaty::Role> for PieceType {
    fn from(role: shakmaty::Role) -> Self {
        match role {
            shakmaty::Role::King => PieceType::King,
            shakmaty::Role::Queen => PieceType::Queen,
            shakmaty::Role::Bishop => PieceType::Bishop,
            shakmaty::Role::Knight => PieceType::Knight,
            shakmaty::Role::Rook => PieceType::Rook,
            shakmaty::Role::Pawn => PieceType::Pawn,
        }
    }
}

/// One of the twelve drawable pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Default)]
pub struct PieceKind {
    pub color: PieceColor,
    pub piece_type: PieceType,
}

const TYPES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
];

impl PieceKind {
    pub const COUNT: usize = 12;

    pub const fn new(color: PieceColor, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    /// All kinds, White first, in [`PieceKind::index`] order
    pub fn all() -> impl Iterator<Item = PieceKind> {
        [PieceColor::White, PieceColor::Black]
            .into_iter()
            .flat_map(|color| TYPES.into_iter().map(move |piece_type| PieceKind::new(color, piece_type)))
    }

    /// Dense index in `0..12`
    pub fn index(self) -> usize {
        let type_index = match self.piece_type {
            PieceType::Pawn => 0,
            PieceType::Rook => 1,
            PieceType::Knight => 2,
            PieceType::Bishop => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        };
        match self.color {
            PieceColor::White => type_index,
            PieceColor::Black => type_index + 6,
        }
    }

    /// FEN symbol: upper case for White, lower case for Black
    pub fn symbol(self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            PieceColor::White => letter,
            PieceColor::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        let color = if symbol.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        let piece_type = TYPES
            .into_iter()
            .find(|piece_type| piece_type.letter() == symbol.to_ascii_uppercase())?;
        Some(Self::new(color, piece_type))
    }

    /// Image path relative to the asset root, e.g. `imgs/Knight Black.png`
    pub fn asset_path(self) -> String {
        format!("imgs/{} {}.png", self.piece_type.name(), self.color.name())
    }
}

impl From<shakmaty::Piece> for PieceKind {
    fn from(piece: shakmaty::Piece) -> Self {
        Self::new(piece.color.into(), piece.role.into())
    }
}

/// Marks a pooled piece entity and records what it draws
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Piece {
    pub kind: PieceKind,
}
