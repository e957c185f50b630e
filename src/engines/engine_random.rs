//! Random-move engine.
//!
//! Selects uniformly from legal moves. Used as a sparring partner in the
//! match harness and for integration testing.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessError;
use crate::engines::engine_trait::Engine;
use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> Result<Option<Move>, ChessError> {
        let color = game_state.side_to_move();
        let legal = legal_moves(game_state, color)?;
        Ok(legal.as_slice().choose(&mut self.rng).copied())
    }
}
