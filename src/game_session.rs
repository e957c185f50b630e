//! A game in progress, as seen by a front end.
//!
//! `GameSession` owns the board and keeps the legal-move list for the side
//! to move together with each move's opponent replies. Playing one of those
//! moves reuses its reply list to build the next legal list, so the opponent
//! move generation done for the legality check is not repeated. Status is
//! recomputed after every move and every undo.

use log::warn;

use crate::chess_errors::ChessError;
use crate::engines::engine_trait::Engine;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::game_status::GameStatus;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{legal_moves_from_pseudo, LegalMoveGenerator};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};

#[derive(Debug, Clone)]
pub struct GameSession {
    game_state: GameState,
    legal: Vec<GeneratedMove>,
    status: GameStatus,
}

impl GameSession {
    pub fn new() -> MoveGenResult<Self> {
        Self::from_game_state(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Self::from_game_state(GameState::from_fen(fen)?)
    }

    pub fn from_game_state(game_state: GameState) -> MoveGenResult<Self> {
        let mut session = Self {
            game_state,
            legal: Vec::new(),
            status: GameStatus::Ongoing,
        };
        session.refresh(None)?;
        Ok(session)
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.game_state.side_to_move()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        is_king_in_check(&self.game_state, self.side_to_move())
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal.iter().map(|generated| generated.mv).collect()
    }

    /// Destinations of the legal moves starting on `from`, for highlighting
    /// a selected piece.
    pub fn destinations_from(&self, from: Square) -> Vec<Square> {
        self.legal
            .iter()
            .filter(|generated| generated.mv.from == from)
            .map(|generated| generated.mv.to)
            .collect()
    }

    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal.iter().any(|generated| generated.mv == mv)
    }

    /// Play `mv` if it is in the current legal list.
    pub fn play(&mut self, mv: Move) -> Result<MoveRecord, ChessError> {
        let index = self
            .legal
            .iter()
            .position(|generated| generated.mv == mv)
            .ok_or(ChessError::IllegalMove(mv))?;

        let record = self.game_state.apply_move(mv)?;
        let replies = std::mem::take(&mut self.legal)
            .swap_remove(index)
            .opponent_replies;
        self.refresh(replies)?;
        Ok(record)
    }

    /// Take back the most recent move, or return `None` at the start of the
    /// session's history.
    pub fn undo(&mut self) -> MoveGenResult<Option<MoveRecord>> {
        if self.game_state.history().is_empty() {
            return Ok(None);
        }
        let record = self.game_state.undo_last_move();
        self.refresh(None)?;
        Ok(Some(record))
    }

    /// Ask `engine` for a move and play it. Returns `None` without consulting
    /// the engine once the game is over.
    pub fn engine_move(&mut self, engine: &mut dyn Engine) -> Result<Option<Move>, ChessError> {
        if self.status.is_terminal() {
            warn!(
                "{} asked to move in a finished game ({:?})",
                engine.name(),
                self.status
            );
            return Ok(None);
        }

        let Some(mv) = engine.choose_move(&mut self.game_state)? else {
            return Ok(None);
        };
        self.play(mv)?;
        Ok(Some(mv))
    }

    fn refresh(&mut self, cached_replies: Option<Vec<Move>>) -> MoveGenResult<()> {
        let color = self.game_state.side_to_move();
        self.legal = match cached_replies {
            Some(replies) => legal_moves_from_pseudo(&mut self.game_state, color, &replies, true)?,
            None => LegalMoveGenerator.generate_legal_moves(&mut self.game_state, color)?,
        };
        self.status = GameStatus::from_counts(
            self.legal.len(),
            is_king_in_check(&self.game_state, color),
        );
        Ok(())
    }
}
