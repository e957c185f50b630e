use crate::game_state::chess_types::Square;

/// `(d_row, d_col)` single steps available to a king.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// On-board squares adjacent to `square`.
#[inline]
pub fn king_targets(square: Square) -> impl Iterator<Item = Square> {
    KING_OFFSETS
        .iter()
        .filter_map(move |&(d_row, d_col)| square.offset(d_row, d_col))
}
