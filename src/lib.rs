//! SableChess - rules-correct chess core with a fixed-depth engine
//!
//! The crate provides:
//! - A mutable `Position` with exact, reversible apply/undo mutation
//! - A legal-move generator enforcing check, pin, castling, promotion,
//!   and double-check semantics via a king-centered pin/check analyzer
//! - A static evaluator (material + piece-square tables)
//! - Fixed-depth minimax search with alpha-beta pruning
//!
//! Everything is single-threaded and synchronous; search mutates the
//! live position under a strict apply/undo discipline instead of
//! copying it.

pub mod board;
pub mod cli;
pub mod error;
pub mod evaluation;
pub mod move_generator;
pub mod search;
pub mod types;
