//! Ray directions for rooks, bishops, and queens.
//!
//! The queen is not special-cased anywhere: it walks the union of the rook
//! and bishop directions.

use crate::game_state::chess_types::Square;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Squares along one ray from `from` (exclusive) to the board edge.
pub fn ray(from: Square, direction: (i8, i8)) -> impl Iterator<Item = Square> {
    let (d_row, d_col) = direction;
    std::iter::successors(from.offset(d_row, d_col), move |sq| sq.offset(d_row, d_col))
}
