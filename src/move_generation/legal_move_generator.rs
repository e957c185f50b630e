//! Legal move generation pipeline.
//!
//! Generates pseudo-legal moves, applies each one to the live board, rejects
//! those that leave the mover's king attacked, and undoes the move. The
//! opponent's reply list built for the safety test can be kept on each legal
//! move so the next ply does not regenerate it.

use std::collections::BTreeMap;

use crate::chess_errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::king_attacked_by;
use crate::move_generation::legal_moves_king::generate_castling_moves;
use crate::move_generation::move_generator::{
    generate_pseudo_legal_moves, CastlingMode, GeneratedMove, MoveGenResult, MoveGenerator,
};

/// Keeps each legal move's opponent replies.
pub struct LegalMoveGenerator;
/// Drops the replies; used by search and perft.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(
        &self,
        game_state: &mut GameState,
        color: Color,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        ensure_side_to_move(game_state, color)?;
        let mut pseudo = Vec::with_capacity(64);
        generate_pseudo_legal_moves(game_state, color, CastlingMode::Include, &mut pseudo);
        filter_legal_moves(game_state, pseudo, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(
        &self,
        game_state: &mut GameState,
        color: Color,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        ensure_side_to_move(game_state, color)?;
        let mut pseudo = Vec::with_capacity(64);
        generate_pseudo_legal_moves(game_state, color, CastlingMode::Include, &mut pseudo);
        filter_legal_moves(game_state, pseudo, false)
    }
}

/// Legal moves for `color` as plain moves.
pub fn legal_moves(game_state: &mut GameState, color: Color) -> MoveGenResult<Vec<Move>> {
    Ok(FastLegalMoveGenerator
        .generate_legal_moves(game_state, color)?
        .into_iter()
        .map(|generated| generated.mv)
        .collect())
}

/// Legal moves for `color`, reusing a reply list cached by the previous ply.
///
/// `cached_replies` must have been produced in exactly the current position
/// (it is the `opponent_replies` of the move that led here). Castling is added
/// fresh because reply lists never contain it.
pub fn legal_moves_from_pseudo(
    game_state: &mut GameState,
    color: Color,
    cached_replies: &[Move],
    keep_replies: bool,
) -> MoveGenResult<Vec<GeneratedMove>> {
    ensure_side_to_move(game_state, color)?;
    debug_assert!(cached_replies.iter().all(|mv| mv.color == color));
    let mut pseudo = cached_replies.to_vec();
    generate_castling_moves(game_state, color, &mut pseudo);
    filter_legal_moves(game_state, pseudo, keep_replies)
}

// Only the side to move can be filtered: the other side's pseudo-legal list
// may contain a king capture.
fn ensure_side_to_move(game_state: &GameState, color: Color) -> MoveGenResult<()> {
    let to_move = game_state.side_to_move();
    if color != to_move {
        return Err(ChessError::NotSideToMove {
            requested: color,
            to_move,
        });
    }
    Ok(())
}

fn filter_legal_moves(
    game_state: &mut GameState,
    pseudo: Vec<Move>,
    keep_replies: bool,
) -> MoveGenResult<Vec<GeneratedMove>> {
    let mut legal = Vec::with_capacity(pseudo.len());
    let mut replies = Vec::with_capacity(64);

    for mv in pseudo {
        let record = game_state.apply_move(mv)?;

        replies.clear();
        generate_pseudo_legal_moves(game_state, mv.color.opposite(), CastlingMode::Skip, &mut replies);
        let king_safe = !king_attacked_by(&replies, game_state.king_square(mv.color));

        game_state.undo_move(&record);

        if king_safe {
            legal.push(GeneratedMove {
                mv,
                opponent_replies: keep_replies.then(|| replies.clone()),
            });
        }
    }

    Ok(legal)
}

/// Group moves by origin square, for callers that highlight per piece.
pub fn group_by_origin(moves: &[Move]) -> BTreeMap<Square, Vec<Square>> {
    let mut grouped = BTreeMap::<Square, Vec<Square>>::new();
    for mv in moves {
        grouped.entry(mv.from).or_default().push(mv.to);
    }
    grouped
}
