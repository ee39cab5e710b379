//! SableChess - Error types
//!
//! The error taxonomy is intentionally narrow: engine operations model
//! failure as no-ops or empty results, so errors only arise when parsing
//! user-facing notation or building a custom position.

use crate::types::Color;
use thiserror::Error;

/// Errors produced by notation parsing and position construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Square name is not of the form `a1`..`h8`
    #[error("invalid square name: {0:?}")]
    InvalidSquare(String),

    /// Move text is not of the form `e2e4` or `e7e8q`
    #[error("invalid move text: {0:?}")]
    InvalidMove(String),

    /// Promotion letter is not one of q, r, b, n
    #[error("invalid promotion piece: {0:?}")]
    InvalidPromotion(char),

    /// A custom layout is missing a king
    #[error("position has no {0} king")]
    MissingKing(Color),
}

/// Result type alias for chess operations
pub type ChessResult<T> = Result<T, ChessError>;
