//! Pseudo-legal rook move generation.
//!
//! Emits rook moves along ranks and files for one rook, including captures.
//! Castling is generated from the king's side, not here.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_slider_moves;
use crate::moves::sliding_moves::ROOK_DIRECTIONS;

pub fn generate_rook_moves(game_state: &GameState, color: Color, from: Square, out: &mut Vec<Move>) {
    push_slider_moves(game_state, color, from, &ROOK_DIRECTIONS, out);
}
