//! Pluggable board evaluation interfaces and a baseline implementation.
//!
//! Search stays independent of how positions are judged by delegating static
//! scoring to [`Evaluator`]. Scores are from White's point of view: positive
//! favors White, negative favors Black, regardless of who is to move.

use crate::chess_errors::EvaluationError;
use crate::game_state::{chess_types::*, game_state::GameState};

pub trait Evaluator {
    /// Score `game_state`; higher is better for White.
    fn score(&self, game_state: &GameState) -> Result<f64, EvaluationError>;
}

impl<F> Evaluator for F
where
    F: Fn(&GameState) -> Result<f64, EvaluationError>,
{
    #[inline]
    fn score(&self, game_state: &GameState) -> Result<f64, EvaluationError> {
        self(game_state)
    }
}

/// White material minus Black material, in pawns.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    /// Centipawn value of `kind`. Kings are never traded, so they count zero.
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    pub fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        Square::all()
            .filter_map(|sq| game_state.piece_at(sq))
            .map(|piece| match piece.color {
                Color::White => Self::piece_value(piece.kind),
                Color::Black => -Self::piece_value(piece.kind),
            })
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    fn score(&self, game_state: &GameState) -> Result<f64, EvaluationError> {
        Ok(f64::from(Self::material_balance_white_minus_black(game_state)) / 100.0)
    }
}

/// Integer code of a piece in the flat board encoding. Black pieces take
/// `1..=6`, White pieces `8..=13`, and empty squares `0`.
#[inline]
pub const fn piece_code(piece: Piece) -> i8 {
    let base = match piece.kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 2,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 4,
        PieceKind::Queen => 5,
        PieceKind::King => 6,
    };
    match piece.color {
        Color::Black => base,
        Color::White => base + 7,
    }
}

/// Flatten the board into the 64-entry feature vector consumed by learned
/// evaluators. Entry `i` describes [`Square::from_index`]`(i)`, so the vector
/// starts at a1 and runs rank by rank towards h8.
pub fn encode_board(game_state: &GameState) -> [i8; 64] {
    let mut encoded = [0i8; 64];
    for sq in Square::all() {
        if let Some(piece) = game_state.piece_at(sq) {
            encoded[sq.index()] = piece_code(piece);
        }
    }
    encoded
}
