use crate::game_state::chess_types::{Color, Square};

/// Row a pawn of `color` starts on and may double-advance from.
#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Row on which a pawn of `color` promotes.
#[inline]
pub const fn pawn_promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Row a pawn of `color` must stand on to capture en passant.
#[inline]
pub const fn pawn_en_passant_row(color: Color) -> u8 {
    match color {
        Color::White => 4,
        Color::Black => 3,
    }
}

/// The (up to two) diagonal squares a pawn of `color` on `square` attacks.
#[inline]
pub fn pawn_attack_targets(color: Color, square: Square) -> impl Iterator<Item = Square> {
    let forward = color.forward();
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |d_col| square.offset(forward, d_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        let e4 = Square::new(3, 4);
        let white: Vec<Square> = pawn_attack_targets(Color::White, e4).collect();
        assert_eq!(white, vec![Square::new(4, 3), Square::new(4, 5)]);

        let black: Vec<Square> = pawn_attack_targets(Color::Black, e4).collect();
        assert_eq!(black, vec![Square::new(2, 3), Square::new(2, 5)]);

        let a2 = Square::new(1, 0);
        assert_eq!(pawn_attack_targets(Color::White, a2).count(), 1);
    }

    #[test]
    fn pawn_rows_mirror_between_colors() {
        assert_eq!(pawn_start_row(Color::White) + pawn_start_row(Color::Black), 7);
        assert_eq!(pawn_en_passant_row(Color::White) + pawn_en_passant_row(Color::Black), 7);
        assert_eq!(pawn_promotion_row(Color::Black), 0);
    }
}
