//! Long-algebraic (`e2e4`) move text.
//!
//! Parsed moves are resolved against the legal list for the side to move, so
//! a successful parse is always playable. Promotion is always to a queen: a
//! trailing `q` is accepted and any other suffix is rejected.

use crate::chess_errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::utils::algebraic::algebraic_to_square;

/// Format `mv` as long algebraic, adding the `q` suffix for promotions.
pub fn move_to_long_algebraic(mv: Move, game_state: &GameState) -> String {
    let promotes = game_state
        .piece_at(mv.from)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn)
        && (mv.to.row() == 0 || mv.to.row() == 7);

    if promotes {
        format!("{mv}q")
    } else {
        mv.to_string()
    }
}

/// Resolve `text` to a legal move for the side to move.
pub fn long_algebraic_to_move(text: &str, game_state: &mut GameState) -> Result<Move, ChessError> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidAlgebraic(format!(
            "expected a move like e2e4, got {text:?}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let color = game_state.side_to_move();
    let mv = Move::new(from, to, color);

    if let Some(suffix) = text[4..].chars().next() {
        if suffix.to_ascii_lowercase() != 'q' {
            return Err(ChessError::InvalidAlgebraic(format!(
                "promotion piece '{suffix}' is not supported; pawns promote to a queen"
            )));
        }
    }

    if !legal_moves(game_state, color)?.contains(&mv) {
        return Err(ChessError::IllegalMove(mv));
    }

    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_legal_opening_move() {
        let mut game = GameState::new_game();
        let mv = long_algebraic_to_move("e2e4", &mut game).expect("e2e4 should parse");
        assert_eq!(mv, Move::new(Square::new(1, 4), Square::new(3, 4), Color::White));
        assert_eq!(move_to_long_algebraic(mv, &game), "e2e4");
    }

    #[test]
    fn promotion_suffix_is_optional_and_queen_only() {
        let mut game = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let bare = long_algebraic_to_move("a7a8", &mut game).expect("bare promotion should parse");
        let suffixed = long_algebraic_to_move("a7a8q", &mut game).expect("queen suffix should parse");
        assert_eq!(bare, suffixed);
        assert_eq!(move_to_long_algebraic(bare, &game), "a7a8q");

        let err = long_algebraic_to_move("a7a8n", &mut game).expect_err("underpromotion should be rejected");
        assert!(matches!(err, ChessError::InvalidAlgebraic(_)));
    }

    #[test]
    fn castling_and_en_passant_resolve_against_legal_moves() {
        let mut castle = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        long_algebraic_to_move("e1g1", &mut castle).expect("castle should parse");

        let mut en_passant =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        long_algebraic_to_move("e5d6", &mut en_passant).expect("en passant should parse");
    }

    #[test]
    fn illegal_and_malformed_text_is_rejected() {
        let mut game = GameState::new_game();
        let err = long_algebraic_to_move("e2e5", &mut game).expect_err("e2e5 is not legal");
        assert!(matches!(err, ChessError::IllegalMove(_)));

        for bad in ["e2", "e2e4e", "z2e4", "e2e9"] {
            let err = long_algebraic_to_move(bad, &mut game).expect_err("malformed move should be rejected");
            assert!(matches!(err, ChessError::InvalidAlgebraic(_)), "{bad}");
        }
    }
}
