//! SableChess - Position Evaluation Module
//!
//! Static scoring: material plus piece-square-table bonuses for pawns,
//! knights, and bishops, from white's perspective (positive favors
//! white). Terminal positions override the material count entirely.

use crate::board::Position;
use crate::types::{Color, PieceKind};

/// Score assigned to a delivered checkmate; also the search window bound
pub const CHECKMATE_SCORE: i32 = 999_999;

/// Material value in centipawns
pub fn material(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

// Tables are laid out with row 0 at the top of the board (black's back
// rank); they are read directly for white and row-mirrored for black.

#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [ 0,  0,   0,   0,   0,   0,  0,  0],
    [50, 50,  50,  50,  50,  50, 50, 50],
    [10, 10,  20,  30,  30,  20, 10, 10],
    [ 5,  5,  10,  25,  25,  10,  5,  5],
    [ 0,  0,   0,   0,   0,   0,  0,  0],
    [ 5, -5, -10,   0,   0, -10, -5,  5],
    [ 5, 10,  10, -20, -20,  10, 10,  5],
    [ 0,  0,   0,   0,   0,   0,  0,  0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

/// Positional bonus for a piece kind on (row, col); zero for kinds
/// without a table
fn table_bonus(kind: PieceKind, row: usize, col: usize) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_TABLE[row][col],
        PieceKind::Knight => KNIGHT_TABLE[row][col],
        PieceKind::Bishop => BISHOP_TABLE[row][col],
        PieceKind::Rook | PieceKind::Queen | PieceKind::King => 0,
    }
}

/// Static evaluation from white's perspective. Relies on the terminal
/// flags set by the last `legal_moves()` call: a checkmated side to move
/// scores as a huge loss, stalemate as exactly zero.
pub fn evaluate(position: &Position) -> i32 {
    if position.checkmate {
        return if position.white_to_move {
            -CHECKMATE_SCORE
        } else {
            CHECKMATE_SCORE
        };
    }
    if position.stalemate {
        return 0;
    }

    let mut score = 0;
    for row in 0..8 {
        for col in 0..8 {
            let Some(piece) = position.cells[row][col] else {
                continue;
            };
            match piece.color {
                Color::White => {
                    score += material(piece.kind) + table_bonus(piece.kind, row, col);
                }
                Color::Black => {
                    score -= material(piece.kind) + table_bonus(piece.kind, 7 - row, col);
                }
            }
        }
    }
    score
}
