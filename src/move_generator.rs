//! SableChess - Move Generator Module
//!
//! Legal-move generation built on a single king-centered sweep: one
//! analyzer pass per position reports check, the checking pieces, and
//! every pinned piece with its pin direction. The per-piece generators
//! then consult that data instead of re-scanning the board for each
//! candidate move.

use crate::board::{CastleSide, Move, Position};
use crate::types::{Color, PieceKind, Square};

/// Ray directions from the king; indices 0-3 are orthogonal, 4-7
/// diagonal. The split decides whether rook/queen or bishop/queen
/// attacks apply on a ray.
const RAY_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A piece shielding its own king from an enemy slider; it may only
/// move along the pin's axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    /// Unit direction from the king toward the pinning piece
    pub dir: (i8, i8),
}

/// An active check on the side to move's king
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    /// Unit direction from the king toward the checker; (0, 0) exactly
    /// for knight checks
    pub dir: (i8, i8),
}

impl Position {
    /// Generate the exactly-legal move set for the side to move, and
    /// refresh `in_check`/`checkmate`/`stalemate` and the cached
    /// pin/check lists.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.checkmate = false;
        self.stalemate = false;

        let (in_check, pins, checks) = self.find_pins_and_checks();
        self.in_check = in_check;
        self.pins = pins;
        self.checks = checks;

        let king = self.king_square(self.side_to_move());

        let mut moves;
        if self.in_check {
            if self.checks.len() == 1 {
                moves = self.pseudo_legal_moves();

                let check = self.checks[0];
                let mut valid_squares = vec![check.square];

                // slider checks can also be blocked on the squares
                // between king and checker; knight checks cannot
                let checker_is_knight = self
                    .piece_at(check.square)
                    .map_or(false, |p| p.kind == PieceKind::Knight);
                if !checker_is_knight {
                    for i in 1..8 {
                        let Some(sq) = king.offset(check.dir.0 * i, check.dir.1 * i) else {
                            break;
                        };
                        valid_squares.push(sq);
                        if sq == check.square {
                            break;
                        }
                    }
                }

                moves.retain(|m| {
                    m.piece_moved.kind == PieceKind::King || valid_squares.contains(&m.end)
                });
            } else {
                // double check: only the king can resolve it
                moves = Vec::new();
                self.king_moves(king, &mut moves);
            }
        } else {
            moves = self.pseudo_legal_moves();
            self.castle_moves(king, &mut moves);
        }

        // should be unreachable with correct check detection, but guards
        // against inconsistent intermediate states
        moves.retain(|m| m.piece_captured.map_or(true, |p| p.kind != PieceKind::King));

        if moves.is_empty() {
            if self.in_check {
                self.checkmate = true;
            } else {
                self.stalemate = true;
            }
        }

        moves
    }

    /// All pseudo-legal moves for the side to move (pin-aware, but not
    /// filtered against an active check)
    pub fn pseudo_legal_moves(&mut self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        let mover = self.side_to_move();

        for row in 0..8u8 {
            for col in 0..8u8 {
                let sq = Square::new(row, col);
                let Some(piece) = self.piece_at(sq) else {
                    continue;
                };
                if piece.color != mover {
                    continue;
                }
                match piece.kind {
                    PieceKind::Pawn => self.pawn_moves(sq, &mut moves),
                    PieceKind::Knight => self.knight_moves(sq, &mut moves),
                    PieceKind::Bishop => self.sliding_moves(sq, &BISHOP_DIRECTIONS, &mut moves),
                    PieceKind::Rook => self.sliding_moves(sq, &ROOK_DIRECTIONS, &mut moves),
                    PieceKind::Queen => self.sliding_moves(sq, &QUEEN_DIRECTIONS, &mut moves),
                    PieceKind::King => self.king_moves(sq, &mut moves),
                }
            }
        }

        moves
    }

    /// Single sweep from the side-to-move's king: walks the 8 rays once
    /// and probes the 8 knight squares, producing the check state, the
    /// checking pieces, and the pinned pieces with their pin direction.
    pub fn find_pins_and_checks(&self) -> (bool, Vec<Pin>, Vec<Check>) {
        let mut pins = Vec::new();
        let mut checks = Vec::new();
        let mut in_check = false;

        let mover = self.side_to_move();
        let enemy = mover.opposite();
        let king = self.king_square(mover);

        for (ray, &(d_row, d_col)) in RAY_DIRECTIONS.iter().enumerate() {
            let orthogonal = ray <= 3;
            let mut possible_pin: Option<Pin> = None;

            for i in 1..8 {
                let Some(sq) = king.offset(d_row * i, d_col * i) else {
                    break;
                };
                let Some(piece) = self.piece_at(sq) else {
                    continue;
                };

                if piece.color == mover {
                    // the king's own (possibly stale, during the
                    // speculative king-move test) cell never blocks
                    if piece.kind == PieceKind::King {
                        continue;
                    }
                    if possible_pin.is_none() {
                        possible_pin = Some(Pin { square: sq, dir: (d_row, d_col) });
                    } else {
                        // second ally on the ray: no pin possible
                        break;
                    }
                } else {
                    let attacks = match piece.kind {
                        PieceKind::Rook => orthogonal,
                        PieceKind::Bishop => !orthogonal,
                        PieceKind::Queen => true,
                        PieceKind::Pawn => {
                            // a pawn attacks one step along its own
                            // capture diagonals
                            i == 1
                                && !orthogonal
                                && match enemy {
                                    Color::White => d_row == 1,
                                    Color::Black => d_row == -1,
                                }
                        }
                        // keeps generated king moves off squares next
                        // to the enemy king
                        PieceKind::King => i == 1,
                        PieceKind::Knight => false,
                    };

                    if attacks {
                        match possible_pin {
                            None => {
                                in_check = true;
                                checks.push(Check { square: sq, dir: (d_row, d_col) });
                            }
                            Some(pin) => pins.push(pin),
                        }
                    }
                    // any enemy piece ends the ray
                    break;
                }
            }
        }

        // knights jump over blockers, so probe their squares directly
        for &(d_row, d_col) in &KNIGHT_JUMPS {
            let Some(sq) = king.offset(d_row, d_col) else {
                continue;
            };
            if let Some(piece) = self.piece_at(sq) {
                if piece.color == enemy && piece.kind == PieceKind::Knight {
                    in_check = true;
                    checks.push(Check { square: sq, dir: (0, 0) });
                }
            }
        }

        (in_check, pins, checks)
    }

    /// Pin direction for the piece on `sq`, if it is pinned
    fn pin_on(&self, sq: Square) -> Option<(i8, i8)> {
        self.pins.iter().find(|p| p.square == sq).map(|p| p.dir)
    }

    fn pawn_moves(&self, sq: Square, moves: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(sq) else {
            return;
        };
        let pin = self.pin_on(sq);

        let (step, start_row, enemy) = match piece.color {
            Color::White => (-1i8, 6, Color::Black),
            Color::Black => (1i8, 1, Color::White),
        };

        // forward pushes: only along the file, so only legal when not
        // pinned or pinned along the file
        if let Some(one) = sq.offset(step, 0) {
            if self.piece_at(one).is_none() {
                let can_move = pin.map_or(true, |d| d == (step, 0) || d == (-step, 0));
                if can_move {
                    moves.push(Move::new(sq, one, piece, None));
                    if sq.row == start_row {
                        if let Some(two) = sq.offset(2 * step, 0) {
                            if self.piece_at(two).is_none() {
                                moves.push(Move::new(sq, two, piece, None));
                            }
                        }
                    }
                }
            }
        }

        // diagonal captures
        for d_col in [-1i8, 1] {
            let Some(end) = sq.offset(step, d_col) else {
                continue;
            };
            let Some(target) = self.piece_at(end) else {
                continue;
            };
            if target.color != enemy {
                continue;
            }
            let can_capture = pin.map_or(true, |d| d == (step, d_col) || d == (-step, -d_col));
            if can_capture {
                moves.push(Move::new(sq, end, piece, Some(target)));
            }
        }
    }

    fn knight_moves(&self, sq: Square, moves: &mut Vec<Move>) {
        // a pinned knight can never stay on the pin axis
        if self.pin_on(sq).is_some() {
            return;
        }
        let Some(piece) = self.piece_at(sq) else {
            return;
        };

        for &(d_row, d_col) in &KNIGHT_JUMPS {
            let Some(end) = sq.offset(d_row, d_col) else {
                continue;
            };
            let target = self.piece_at(end);
            if target.map_or(true, |t| t.color != piece.color) {
                moves.push(Move::new(sq, end, piece, target));
            }
        }
    }

    fn sliding_moves(&self, sq: Square, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(sq) else {
            return;
        };
        let pin = self.pin_on(sq);

        for &(d_row, d_col) in directions {
            // a pinned slider may only move along the pin axis
            if let Some(d) = pin {
                if d != (d_row, d_col) && d != (-d_row, -d_col) {
                    continue;
                }
            }

            for i in 1..8 {
                let Some(end) = sq.offset(d_row * i, d_col * i) else {
                    break;
                };
                match self.piece_at(end) {
                    None => moves.push(Move::new(sq, end, piece, None)),
                    Some(target) if target.color != piece.color => {
                        moves.push(Move::new(sq, end, piece, Some(target)));
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
    }

    /// King steps; each candidate is vetted by speculatively relocating
    /// the cached king square and re-running the analyzer. The cache is
    /// restored unconditionally, so the true position is never
    /// corrupted.
    fn king_moves(&mut self, sq: Square, moves: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(sq) else {
            return;
        };

        for d_row in -1i8..=1 {
            for d_col in -1i8..=1 {
                if d_row == 0 && d_col == 0 {
                    continue;
                }
                let Some(end) = sq.offset(d_row, d_col) else {
                    continue;
                };
                let target = self.piece_at(end);
                if target.map_or(false, |t| t.color == piece.color) {
                    continue;
                }

                let original = self.king_square(piece.color);
                self.set_king_square(piece.color, end);
                let (in_check, _, _) = self.find_pins_and_checks();
                self.set_king_square(piece.color, original);

                if !in_check {
                    moves.push(Move::new(sq, end, piece, target));
                }
            }
        }
    }

    /// Castle offers for the side to move; never called while in check
    fn castle_moves(&mut self, king: Square, moves: &mut Vec<Move>) {
        if self.square_under_attack(king) {
            return;
        }
        let mover = self.side_to_move();
        if self.castle_rights.get(mover, CastleSide::King) {
            self.kingside_castle_moves(king, moves);
        }
        if self.castle_rights.get(mover, CastleSide::Queen) {
            self.queenside_castle_moves(king, moves);
        }
    }

    fn kingside_castle_moves(&mut self, king: Square, moves: &mut Vec<Move>) {
        let (Some(one), Some(two)) = (king.offset(0, 1), king.offset(0, 2)) else {
            return;
        };
        if self.piece_at(one).is_none()
            && self.piece_at(two).is_none()
            && !self.square_under_attack(one)
            && !self.square_under_attack(two)
        {
            if let Some(piece) = self.piece_at(king) {
                moves.push(Move::castling(king, two, piece));
            }
        }
    }

    fn queenside_castle_moves(&mut self, king: Square, moves: &mut Vec<Move>) {
        let (Some(one), Some(two), Some(three)) =
            (king.offset(0, -1), king.offset(0, -2), king.offset(0, -3))
        else {
            return;
        };
        if self.piece_at(one).is_none()
            && self.piece_at(two).is_none()
            && self.piece_at(three).is_none()
            && !self.square_under_attack(one)
            && !self.square_under_attack(two)
        {
            if let Some(piece) = self.piece_at(king) {
                moves.push(Move::castling(king, two, piece));
            }
        }
    }

    /// Whether the opponent could move onto `sq`. Flips the side to
    /// move, regenerates the opponent's pseudo-legal moves, and flips
    /// back.
    fn square_under_attack(&mut self, sq: Square) -> bool {
        self.white_to_move = !self.white_to_move;
        let opponent_moves = self.pseudo_legal_moves();
        self.white_to_move = !self.white_to_move;
        opponent_moves.iter().any(|m| m.end == sq)
    }
}
