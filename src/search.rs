//! SableChess - Search Module
//!
//! Fixed-depth minimax with alpha-beta pruning. The search reuses the
//! live position through apply/undo rather than copying it, so every
//! apply is matched by an undo on every path - including the pruning
//! break. Node counts are threaded through an explicit `SearchStats`
//! rather than kept in shared state.

use crate::board::{Move, Position};
use crate::evaluation::{evaluate, CHECKMATE_SCORE};
use tracing::debug;

/// Depth the interactive driver searches at unless told otherwise
pub const DEFAULT_DEPTH: u32 = 3;

/// Counters accumulated over one search call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, including leaves
    pub nodes: u64,
}

/// Depth-limited alpha-beta. `maximizing` follows white: alpha is the
/// best score white has guaranteed so far, beta the best black has;
/// once `beta <= alpha` the remaining siblings cannot matter.
///
/// Depth 0 and terminal positions return the static evaluation.
pub fn minimax(
    position: &mut Position,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 || position.checkmate || position.stalemate {
        return evaluate(position);
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        // legal_moves just set the terminal flag
        return evaluate(position);
    }

    if maximizing {
        let mut best = -CHECKMATE_SCORE;
        for mv in moves {
            position.apply(mv);
            let score = minimax(position, depth - 1, alpha, beta, false, stats);
            position.undo();

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = CHECKMATE_SCORE;
        for mv in moves {
            position.apply(mv);
            let score = minimax(position, depth - 1, alpha, beta, true, stats);
            position.undo();

            if score < best {
                best = score;
            }
            if best < beta {
                beta = best;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Root driver: scores every legal move with a fresh full window and
/// keeps the best from the mover's perspective. `None` when the side to
/// move has no legal moves.
pub fn choose_best_move(position: &mut Position, depth: u32) -> (Option<Move>, SearchStats) {
    let mut stats = SearchStats::default();

    let moves = position.legal_moves();
    if moves.is_empty() {
        return (None, stats);
    }

    let maximizing = position.white_to_move;
    let mut best_move: Option<Move> = None;
    let mut best_score = if maximizing { -CHECKMATE_SCORE } else { CHECKMATE_SCORE };

    for mv in moves {
        position.apply(mv);
        let score = minimax(
            position,
            depth.saturating_sub(1),
            -CHECKMATE_SCORE,
            CHECKMATE_SCORE,
            !maximizing,
            &mut stats,
        );
        position.undo();

        let improves = if maximizing { score > best_score } else { score < best_score };
        if best_move.is_none() || improves {
            best_score = score;
            best_move = Some(mv);
        }
    }

    if let Some(mv) = best_move {
        debug!(
            best = %mv,
            score = best_score,
            nodes = stats.nodes,
            depth,
            "search complete"
        );
    }

    (best_move, stats)
}
