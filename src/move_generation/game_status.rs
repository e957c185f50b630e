//! Terminal-state classification.
//!
//! Status is derived from the legal-move count and check state of the side to
//! move every time it is asked for; nothing is cached on the board.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn from_counts(legal_move_count: usize, in_check: bool) -> Self {
        match (legal_move_count, in_check) {
            (0, true) => GameStatus::Checkmate,
            (0, false) => GameStatus::Stalemate,
            _ => GameStatus::Ongoing,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    #[inline]
    pub fn is_checkmate(self) -> bool {
        self == GameStatus::Checkmate
    }

    #[inline]
    pub fn is_stalemate(self) -> bool {
        self == GameStatus::Stalemate
    }
}

/// Status for `color` to move in the current position. `color` must be the
/// side to move; asking about the other side is an error.
pub fn game_status(game_state: &mut GameState, color: Color) -> MoveGenResult<GameStatus> {
    let legal = FastLegalMoveGenerator.generate_legal_moves(game_state, color)?;
    Ok(GameStatus::from_counts(
        legal.len(),
        is_king_in_check(game_state, color),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(fen: &str) -> GameStatus {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let color = game.side_to_move();
        game_status(&mut game, color).expect("status should compute")
    }

    #[test]
    fn starting_position_is_ongoing() {
        assert_eq!(status_of(crate::game_state::chess_rules::STARTING_POSITION_FEN), GameStatus::Ongoing);
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        assert_eq!(status_of("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"), GameStatus::Checkmate);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        assert_eq!(
            status_of("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            GameStatus::Checkmate
        );
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn check_with_an_escape_is_ongoing() {
        assert_eq!(status_of("R5k1/5pp1/8/8/8/8/8/6K1 b - - 0 1"), GameStatus::Ongoing);
    }

    #[test]
    fn status_for_the_side_not_to_move_is_an_error() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        let err = game_status(&mut game, Color::Black).expect_err("black is not to move");
        assert!(matches!(err, crate::chess_errors::ChessError::NotSideToMove { .. }));
        assert_eq!(game_status(&mut game, Color::White).expect("white status should compute"), GameStatus::Ongoing);
    }

    #[test]
    fn classification_is_mutually_exclusive() {
        for count in [0usize, 1, 20] {
            for in_check in [false, true] {
                let status = GameStatus::from_counts(count, in_check);
                assert!(!(status.is_checkmate() && status.is_stalemate()));
                assert_eq!(status.is_terminal(), count == 0);
            }
        }
    }
}
