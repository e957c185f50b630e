//! Attack and check detection.
//!
//! A square is attacked when one of the attacker's pseudo-legal moves lands on
//! it. Two corrections make that test exact for empty squares: pawn pushes are
//! not attacks, and a pawn attacks both forward diagonals whether or not
//! anything stands there. Castling is never generated for the attacker.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{generate_pseudo_legal_moves, CastlingMode};
use crate::moves::pawn_moves::pawn_attack_targets;

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, game_state.king_square(color), color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    if is_attacked_by_pawn(game_state, square, attacker_color) {
        return true;
    }

    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, attacker_color, CastlingMode::Skip, &mut moves);
    moves.iter().any(|mv| {
        mv.to == square
            && game_state
                .piece_at(mv.from)
                .is_some_and(|piece| piece.kind != PieceKind::Pawn)
    })
}

/// True when an occupied `king_square` is the destination of any move in
/// `opponent_moves`.
///
/// Pawn pushes never land on an occupied square, so a plain pseudo-legal reply
/// list answers the king-safety question without the pawn corrections
/// `is_square_attacked` needs.
#[inline]
pub fn king_attacked_by(opponent_moves: &[Move], king_square: Square) -> bool {
    opponent_moves.iter().any(|mv| mv.to == king_square)
}

fn is_attacked_by_pawn(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attacker_pawn = Piece::new(attacker_color, PieceKind::Pawn);
    // A pawn attacking `square` stands where a defending pawn on `square`
    // would attack.
    pawn_attack_targets(attacker_color.opposite(), square)
        .any(|from| game_state.piece_at(from) == Some(attacker_pawn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_no_checks() {
        let game = GameState::new_game();
        assert!(!is_king_in_check(&game, Color::White));
        assert!(!is_king_in_check(&game, Color::Black));
    }

    #[test]
    fn pawn_attacks_diagonals_but_not_the_push_square() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, Square::new(2, 3), Color::White));
        assert!(is_square_attacked(&game, Square::new(2, 5), Color::White));
        assert!(!is_square_attacked(&game, Square::new(2, 4), Color::White));
        assert!(!is_square_attacked(&game, Square::new(3, 4), Color::White));
    }

    #[test]
    fn slider_attack_is_blocked_by_pieces() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/R2nK3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, Square::new(0, 3), Color::White));
        assert!(!is_square_attacked(&game, Square::new(0, 6), Color::White));
        assert!(is_square_attacked(&game, Square::new(7, 0), Color::White));
    }

    #[test]
    fn knight_gives_check() {
        let game = GameState::from_fen("4k3/8/3N4/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&game, Color::Black));
        assert!(!is_king_in_check(&game, Color::White));
    }

    #[test]
    fn king_attacked_by_uses_destinations_only() {
        let king = Square::new(0, 4);
        let replies = vec![
            Move::new(Square::new(7, 4), Square::new(1, 4), Color::Black),
            Move::new(Square::new(7, 4), king, Color::Black),
        ];
        assert!(king_attacked_by(&replies, king));
        assert!(!king_attacked_by(&replies[..1], king));
    }
}
