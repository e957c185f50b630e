//! Canonical chess-rule constants.
//!
//! Holds the standard starting position and the fixed castling geometry used
//! by both move generation and move application.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Column the king starts on.
pub const KING_HOME_COL: u8 = 4;

/// Fixed squares involved in one castling direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub color: Color,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Columns strictly between king and rook on the back row.
    pub must_be_empty: &'static [u8],
    /// Columns the king stands on or crosses, including its destination.
    pub must_not_be_attacked: &'static [u8],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        right: CASTLE_WHITE_KINGSIDE,
        color: Color::White,
        king_from: Square::new(0, 4),
        king_to: Square::new(0, 6),
        rook_from: Square::new(0, 7),
        rook_to: Square::new(0, 5),
        must_be_empty: &[5, 6],
        must_not_be_attacked: &[4, 5, 6],
    },
    CastlingLane {
        right: CASTLE_WHITE_QUEENSIDE,
        color: Color::White,
        king_from: Square::new(0, 4),
        king_to: Square::new(0, 2),
        rook_from: Square::new(0, 0),
        rook_to: Square::new(0, 3),
        must_be_empty: &[1, 2, 3],
        must_not_be_attacked: &[4, 3, 2],
    },
    CastlingLane {
        right: CASTLE_BLACK_KINGSIDE,
        color: Color::Black,
        king_from: Square::new(7, 4),
        king_to: Square::new(7, 6),
        rook_from: Square::new(7, 7),
        rook_to: Square::new(7, 5),
        must_be_empty: &[5, 6],
        must_not_be_attacked: &[4, 5, 6],
    },
    CastlingLane {
        right: CASTLE_BLACK_QUEENSIDE,
        color: Color::Black,
        king_from: Square::new(7, 4),
        king_to: Square::new(7, 2),
        rook_from: Square::new(7, 0),
        rook_to: Square::new(7, 3),
        must_be_empty: &[1, 2, 3],
        must_not_be_attacked: &[4, 3, 2],
    },
];

/// Castling lane matching a king move, if the move is a castle.
#[inline]
pub fn castling_lane_for_king_move(from: Square, to: Square) -> Option<&'static CastlingLane> {
    CASTLING_LANES
        .iter()
        .find(|lane| lane.king_from == from && lane.king_to == to)
}

/// Right lost when a rook leaves, or is captured on, `square`.
#[inline]
pub fn castling_right_for_rook_home(square: Square) -> Option<CastlingRights> {
    CASTLING_LANES
        .iter()
        .find(|lane| lane.rook_from == square)
        .map(|lane| lane.right)
}

#[inline]
pub const fn castling_rights_for_color(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        Color::Black => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
    }
}
