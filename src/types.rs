//! SableChess - Type definitions
//!
//! This module provides the core types for representing colors, piece
//! kinds, pieces, and board squares, along with the two-character piece
//! codes ("wP", "bK") and algebraic square names used at the edges of
//! the engine.

use crate::error::{ChessError, ChessResult};
use std::fmt;

/// Side colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Color letter used in piece codes
    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Closed set of piece kinds; every dispatch over this enum is an
/// exhaustive `match`, so a new rule cannot silently fall through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kind letter used in piece codes
    pub fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parse a kind letter (case-insensitive)
    pub fn from_code(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece; an empty cell is `Option::<Piece>::None`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }

    /// Single display letter: uppercase for white, lowercase for black
    pub fn letter(self) -> char {
        match self.color {
            Color::White => self.kind.code(),
            Color::Black => self.kind.code().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.code(), self.kind.code())
    }
}

/// A board coordinate. Row 0 is black's back rank (rank 8), row 7 is
/// white's (rank 1); columns run a-h.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    /// Step by (row, col) deltas, `None` when off the board
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Algebraic name, e.g. "e4"
    pub fn name(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = 8 - self.row;
        format!("{file}{rank}")
    }

    /// Parse an algebraic name like "e4"
    pub fn parse(text: &str) -> ChessResult<Square> {
        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ChessError::InvalidSquare(text.to_string()));
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidSquare(text.to_string()));
        }
        let col = file as u8 - b'a';
        let row = 8 - (rank as u8 - b'0');
        Ok(Square::new(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col);
                assert_eq!(Square::parse(&sq.name()), Ok(sq));
            }
        }
        assert_eq!(Square::parse("a8"), Ok(Square::new(0, 0)));
        assert_eq!(Square::parse("h1"), Ok(Square::new(7, 7)));
        assert_eq!(Square::parse("e2"), Ok(Square::new(6, 4)));
    }

    #[test]
    fn square_parse_rejects_garbage() {
        assert!(Square::parse("").is_err());
        assert!(Square::parse("e").is_err());
        assert!(Square::parse("i4").is_err());
        assert!(Square::parse("a9").is_err());
        assert!(Square::parse("e44").is_err());
    }

    #[test]
    fn offsets_stay_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Square::new(1, 1)));
    }

    #[test]
    fn piece_letters() {
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).letter(), 'N');
        assert_eq!(Piece::new(Color::Black, PieceKind::Pawn).letter(), 'p');
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).to_string(), "wN");
    }
}
