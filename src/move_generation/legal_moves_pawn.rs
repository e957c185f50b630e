//! Pseudo-legal pawn move generation.
//!
//! Pushes, double pushes from the start row, diagonal captures, and en-passant
//! captures. A pawn reaching the last row is promoted to a queen when the
//! move is applied, so promotions are not emitted as separate moves.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::pawn_moves::{pawn_attack_targets, pawn_en_passant_row, pawn_start_row};

pub fn generate_pawn_moves(game_state: &GameState, color: Color, from: Square, out: &mut Vec<Move>) {
    let forward = color.forward();

    if let Some(one_step) = from.offset(forward, 0) {
        if game_state.piece_at(one_step).is_none() {
            out.push(Move::new(from, one_step, color));

            if from.row() == pawn_start_row(color) {
                if let Some(two_step) = from.offset(2 * forward, 0) {
                    if game_state.piece_at(two_step).is_none() {
                        out.push(Move::new(from, two_step, color));
                    }
                }
            }
        }
    }

    for to in pawn_attack_targets(color, from) {
        if enemy_piece_on(game_state, color, to).is_some() {
            out.push(Move::new(from, to, color));
        } else if is_en_passant_capture(game_state, color, from, to) {
            out.push(Move::new(from, to, color));
        }
    }
}

/// The window square is diagonal to `from`, the pawn stands on its en-passant
/// row, and an enemy pawn sits beside it on the target's column.
fn is_en_passant_capture(game_state: &GameState, color: Color, from: Square, to: Square) -> bool {
    if game_state.en_passant_square() != Some(to) || from.row() != pawn_en_passant_row(color) {
        return false;
    }

    let passed = Square::new(from.row(), to.col());
    game_state.piece_at(passed) == Some(Piece::new(color.opposite(), PieceKind::Pawn))
}
