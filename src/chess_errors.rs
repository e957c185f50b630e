//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by game logic, parsing
//! utilities, move generation, and search. Input problems (bad FEN, bad
//! coordinates, moves outside the legal set) are recoverable and meant to be
//! shown to a user. Broken board invariants (undo with no history, a captured
//! king, a stale king cache) are bugs and panic instead of producing a value
//! of this type.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Move, Square};

/// Unified error type for the chess engine.
#[derive(Debug, Error)]
pub enum ChessError {
    /// A FEN string could not be turned into a valid position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A coordinate or long-algebraic move string failed to parse.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    /// `apply_move` was asked to move from an empty square or a square held by
    /// the other color.
    #[error("no {color:?} piece on {square} to move")]
    NoPieceToMove { square: Square, color: Color },

    /// The move is not in the current legal-move set.
    #[error("illegal move {0}")]
    IllegalMove(Move),

    /// Legal moves or status were requested for the side that just moved.
    #[error("{requested:?} is not to move; {to_move:?} is")]
    NotSideToMove { requested: Color, to_move: Color },

    #[error("no {0:?} king on the board")]
    MissingKing(Color),

    #[error("more than one {0:?} king on the board")]
    MultipleKings(Color),

    /// The position evaluator failed; surfaced unchanged from search.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Failure reported by an [`Evaluator`](crate::search::board_scoring::Evaluator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluator failed: {message}")]
pub struct EvaluationError {
    pub message: String,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
