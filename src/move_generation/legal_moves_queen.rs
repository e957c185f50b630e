use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_slider_moves;
use crate::moves::sliding_moves::QUEEN_DIRECTIONS;

pub fn generate_queen_moves(game_state: &GameState, color: Color, from: Square, out: &mut Vec<Move>) {
    push_slider_moves(game_state, color, from, &QUEEN_DIRECTIONS, out);
}
