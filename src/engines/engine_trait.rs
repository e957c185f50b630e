//! Engine abstraction layer used by the session and the match harness.
//!
//! Different move-selection strategies sit behind a single trait so a game
//! can be driven by any of them, or by two different ones, interchangeably.

use crate::chess_errors::ChessError;
use crate::game_state::{chess_types::Move, game_state::GameState};

pub trait Engine {
    fn name(&self) -> &str;

    /// Reset per-game state. Engines without any keep the default.
    fn new_game(&mut self) {}

    /// Pick a move for the side to move, or `None` when it has no legal move.
    ///
    /// The board may be mutated while thinking but must be restored before
    /// returning, including on error.
    fn choose_move(&mut self, game_state: &mut GameState) -> Result<Option<Move>, ChessError>;
}
