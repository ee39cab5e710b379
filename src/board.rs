//! SableChess - Board Representation Module
//!
//! This module provides the mutable `Position` aggregate (cells, side to
//! move, cached king squares, castling rights, move history) and the
//! immutable `Move` value. All mutation goes through `apply`/`undo`;
//! legality is the move generator's responsibility, so `apply` is total
//! over any well-formed move.

use crate::error::{ChessError, ChessResult};
use crate::move_generator::{Check, Pin};
use crate::types::{Color, Piece, PieceKind, Square};
use std::fmt;

/// Castle side selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

/// The four castling-right flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastleRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastleRights {
    pub const fn all() -> CastleRights {
        CastleRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub const fn none() -> CastleRights {
        CastleRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn get(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_kingside,
            (Color::White, CastleSide::Queen) => self.white_queenside,
            (Color::Black, CastleSide::King) => self.black_kingside,
            (Color::Black, CastleSide::Queen) => self.black_queenside,
        }
    }

    pub fn clear(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_kingside = false,
            (Color::White, CastleSide::Queen) => self.white_queenside = false,
            (Color::Black, CastleSide::King) => self.black_kingside = false,
            (Color::Black, CastleSide::Queen) => self.black_queenside = false,
        }
    }
}

/// A single ply. The moved and captured pieces are captured from the
/// position at construction time, so a `Move` is only meaningful against
/// the exact position state it was built from.
///
/// Equality is (start, end, piece moved) only - not captured piece or
/// flags - so a move proposed as a bare square pair can be matched
/// against the generated legal set.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
    pub is_castle: bool,
    /// Piece a promoting pawn becomes; queen unless the caller overrides
    pub promotion: PieceKind,
}

impl Move {
    /// Create a plain move
    pub fn new(start: Square, end: Square, piece_moved: Piece, piece_captured: Option<Piece>) -> Move {
        Move {
            start,
            end,
            piece_moved,
            piece_captured,
            is_castle: false,
            promotion: PieceKind::Queen,
        }
    }

    /// Create a castling move (the king's two-square step)
    pub fn castling(start: Square, end: Square, piece_moved: Piece) -> Move {
        Move {
            start,
            end,
            piece_moved,
            piece_captured: None,
            is_castle: true,
            promotion: PieceKind::Queen,
        }
    }

    /// Build a candidate move from a square pair against the current
    /// position. Returns `None` when the origin square is empty; any
    /// other mismatch with the rules is caught by the legal-set
    /// membership test downstream, not here.
    pub fn from_squares(start: Square, end: Square, position: &Position) -> Option<Move> {
        let piece_moved = position.piece_at(start)?;
        Some(Move::new(start, end, piece_moved, position.piece_at(end)))
    }

    /// Override the promotion choice
    pub fn with_promotion(mut self, kind: PieceKind) -> Move {
        self.promotion = kind;
        self
    }

    /// Whether this move ends with a pawn on the far rank
    pub fn is_promotion(&self) -> bool {
        self.piece_moved.kind == PieceKind::Pawn
            && match self.piece_moved.color {
                Color::White => self.end.row == 0,
                Color::Black => self.end.row == 7,
            }
    }

    /// Coordinate notation, e.g. "e2e4"
    pub fn notation(&self) -> String {
        format!("{}{}", self.start.name(), self.end.name())
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.start == other.start && self.end == other.end && self.piece_moved == other.piece_moved
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

/// The mutable game position. Created once per game and mutated in place
/// for its whole life; search uses the same apply/undo discipline as
/// interactive play, never copies.
#[derive(Clone)]
pub struct Position {
    /// 8x8 grid; `cells[0]` is black's back rank
    pub cells: [[Option<Piece>; 8]; 8],
    pub white_to_move: bool,
    white_king: Square,
    black_king: Square,
    pub castle_rights: CastleRights,
    /// One snapshot per applied move plus the initial entry, so rights
    /// can be rolled back exactly on undo
    rights_log: Vec<CastleRights>,
    pub move_log: Vec<Move>,
    /// Derived flags, valid only immediately after the last
    /// `legal_moves()` call
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl Position {
    /// Standard initial layout, white to move
    pub fn new() -> Position {
        let mut cells = [[None; 8]; 8];
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back_rank.iter().enumerate() {
            cells[0][col] = Some(Piece::new(Color::Black, kind));
            cells[7][col] = Some(Piece::new(Color::White, kind));
        }
        for col in 0..8 {
            cells[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            cells[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
        }

        Position {
            cells,
            white_to_move: true,
            white_king: Square::new(7, 4),
            black_king: Square::new(0, 4),
            castle_rights: CastleRights::all(),
            rights_log: vec![CastleRights::all()],
            move_log: Vec::new(),
            in_check: false,
            checkmate: false,
            stalemate: false,
            pins: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Build a custom position from a piece list. Both kings must be
    /// present. Castling rights are granted only where the king and the
    /// relevant rook both sit on their home squares.
    pub fn from_pieces(pieces: &[(Square, Piece)], white_to_move: bool) -> ChessResult<Position> {
        let mut cells: [[Option<Piece>; 8]; 8] = [[None; 8]; 8];
        let mut white_king = None;
        let mut black_king = None;

        for &(sq, piece) in pieces {
            cells[sq.row as usize][sq.col as usize] = Some(piece);
            if piece.kind == PieceKind::King {
                match piece.color {
                    Color::White => white_king = Some(sq),
                    Color::Black => black_king = Some(sq),
                }
            }
        }

        let white_king = white_king.ok_or(ChessError::MissingKing(Color::White))?;
        let black_king = black_king.ok_or(ChessError::MissingKing(Color::Black))?;

        let at_home = |sq: Square, color: Color, kind: PieceKind| {
            cells[sq.row as usize][sq.col as usize] == Some(Piece::new(color, kind))
        };
        let rights = CastleRights {
            white_kingside: white_king == Square::new(7, 4)
                && at_home(Square::new(7, 7), Color::White, PieceKind::Rook),
            white_queenside: white_king == Square::new(7, 4)
                && at_home(Square::new(7, 0), Color::White, PieceKind::Rook),
            black_kingside: black_king == Square::new(0, 4)
                && at_home(Square::new(0, 7), Color::Black, PieceKind::Rook),
            black_queenside: black_king == Square::new(0, 4)
                && at_home(Square::new(0, 0), Color::Black, PieceKind::Rook),
        };

        Ok(Position {
            cells,
            white_to_move,
            white_king,
            black_king,
            castle_rights: rights,
            rights_log: vec![rights],
            move_log: Vec::new(),
            in_check: false,
            checkmate: false,
            stalemate: false,
            pins: Vec::new(),
            checks: Vec::new(),
        })
    }

    /// Side whose turn it is
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Piece on a square, `None` for empty
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize]
    }

    #[inline]
    fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.row as usize][sq.col as usize] = piece;
    }

    /// Cached king location; kept equal to the king's actual square
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    pub(crate) fn set_king_square(&mut self, color: Color, sq: Square) {
        match color {
            Color::White => self.white_king = sq,
            Color::Black => self.black_king = sq,
        }
    }

    /// Execute a move. No legality check is performed here.
    pub fn apply(&mut self, mv: Move) {
        self.set_piece(mv.start, None);
        let placed = if mv.is_promotion() {
            Piece::new(mv.piece_moved.color, mv.promotion)
        } else {
            mv.piece_moved
        };
        self.set_piece(mv.end, Some(placed));

        // castling also relocates the rook
        if mv.is_castle {
            let row = mv.end.row;
            if mv.end.col > mv.start.col {
                // kingside: rook jumps from the corner to the king's near side
                let rook = self.piece_at(Square::new(row, mv.end.col + 1));
                self.set_piece(Square::new(row, mv.end.col - 1), rook);
                self.set_piece(Square::new(row, mv.end.col + 1), None);
            } else {
                let rook = self.piece_at(Square::new(row, mv.end.col - 2));
                self.set_piece(Square::new(row, mv.end.col + 1), rook);
                self.set_piece(Square::new(row, mv.end.col - 2), None);
            }
        }

        if mv.piece_moved.kind == PieceKind::King {
            self.set_king_square(mv.piece_moved.color, mv.end);
        }

        self.update_castle_rights(&mv);
        self.rights_log.push(self.castle_rights);
        self.move_log.push(mv);
        self.white_to_move = !self.white_to_move;
    }

    /// Take back the last move; silent no-op when the history is empty.
    ///
    /// Clears `checkmate`/`stalemate` but deliberately leaves
    /// `in_check`/`pins`/`checks` stale until the next `legal_moves()`
    /// call.
    pub fn undo(&mut self) {
        let Some(mv) = self.move_log.pop() else {
            return;
        };
        self.white_to_move = !self.white_to_move;

        self.set_piece(mv.start, Some(mv.piece_moved));
        self.set_piece(mv.end, mv.piece_captured);

        if mv.is_castle {
            let row = mv.end.row;
            if mv.end.col > mv.start.col {
                let rook = self.piece_at(Square::new(row, mv.end.col - 1));
                self.set_piece(Square::new(row, mv.end.col + 1), rook);
                self.set_piece(Square::new(row, mv.end.col - 1), None);
            } else {
                let rook = self.piece_at(Square::new(row, mv.end.col + 1));
                self.set_piece(Square::new(row, mv.end.col - 2), rook);
                self.set_piece(Square::new(row, mv.end.col + 1), None);
            }
        }

        if mv.piece_moved.kind == PieceKind::King {
            self.set_king_square(mv.piece_moved.color, mv.start);
        }

        self.rights_log.pop();
        if let Some(&rights) = self.rights_log.last() {
            self.castle_rights = rights;
        }

        self.checkmate = false;
        self.stalemate = false;
    }

    /// Rights are lost when a king moves, a rook leaves its home square,
    /// or a rook is captured while still on its home square. All checks
    /// run against the move's pieces and squares, not post-move board
    /// state.
    fn update_castle_rights(&mut self, mv: &Move) {
        let home_row = |color| match color {
            Color::White => 7,
            Color::Black => 0,
        };

        if mv.piece_moved.kind == PieceKind::King {
            self.castle_rights.clear(mv.piece_moved.color, CastleSide::King);
            self.castle_rights.clear(mv.piece_moved.color, CastleSide::Queen);
        }

        if mv.piece_moved.kind == PieceKind::Rook && mv.start.row == home_row(mv.piece_moved.color) {
            if mv.start.col == 0 {
                self.castle_rights.clear(mv.piece_moved.color, CastleSide::Queen);
            } else if mv.start.col == 7 {
                self.castle_rights.clear(mv.piece_moved.color, CastleSide::King);
            }
        }

        if let Some(captured) = mv.piece_captured {
            if captured.kind == PieceKind::Rook && mv.end.row == home_row(captured.color) {
                if mv.end.col == 0 {
                    self.castle_rights.clear(captured.color, CastleSide::Queen);
                } else if mv.end.col == 7 {
                    self.castle_rights.clear(captured.color, CastleSide::King);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn rights_log_len(&self) -> usize {
        self.rights_log.len()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        for row in 0..8 {
            write!(f, "{} |", 8 - row)?;
            for col in 0..8 {
                match self.cells[row][col] {
                    Some(piece) => write!(f, " {} |", piece.letter())?,
                    None => write!(f, "   |")?,
                }
            }
            writeln!(f)?;
            writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        }
        write!(f, "    a   b   c   d   e   f   g   h")
    }
}
