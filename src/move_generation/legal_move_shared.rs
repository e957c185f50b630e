//! Helpers shared by the per-piece generators.
//!
//! Every generator emits destinations that are empty or hold an enemy piece;
//! these two helpers encode that rule once for stepping and sliding pieces.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::sliding_moves::ray;

/// Push a move to every target that is empty or enemy-occupied.
#[inline]
pub fn push_step_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    targets: impl Iterator<Item = Square>,
    out: &mut Vec<Move>,
) {
    for to in targets {
        match game_state.piece_at(to) {
            Some(piece) if piece.color == color => {}
            _ => out.push(Move::new(from, to, color)),
        }
    }
}

/// Walk each ray: continue through empties, include and stop at an enemy,
/// stop before a friendly piece.
pub fn push_slider_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &direction in directions {
        for to in ray(from, direction) {
            match game_state.piece_at(to) {
                None => out.push(Move::new(from, to, color)),
                Some(piece) => {
                    if piece.color != color {
                        out.push(Move::new(from, to, color));
                    }
                    break;
                }
            }
        }
    }
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, color: Color, square: Square) -> Option<Piece> {
    game_state
        .piece_at(square)
        .filter(|piece| piece.color != color)
}
