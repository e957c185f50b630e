//! Minimax engine.
//!
//! Thin adapter from [`MinimaxSearch`] to the [`Engine`] trait. Search depth,
//! pruning, ordering, and seeding all come from the wrapped search's config.

use crate::chess_errors::ChessError;
use crate::engines::engine_trait::Engine;
use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::search::board_scoring::{Evaluator, MaterialEvaluator};
use crate::search::minimax::{MinimaxSearch, SearchConfig, SearchResult};

pub struct MinimaxEngine<E: Evaluator> {
    search: MinimaxSearch<E>,
    last_result: Option<SearchResult>,
}

impl<E: Evaluator> MinimaxEngine<E> {
    pub fn new(evaluator: E, config: SearchConfig) -> Self {
        Self {
            search: MinimaxSearch::new(evaluator, config),
            last_result: None,
        }
    }

    /// Score, node count and depth of the most recent search.
    #[inline]
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last_result
    }
}

impl MinimaxEngine<MaterialEvaluator> {
    pub fn material(config: SearchConfig) -> Self {
        Self::new(MaterialEvaluator, config)
    }
}

impl<E: Evaluator> Engine for MinimaxEngine<E> {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.last_result = None;
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> Result<Option<Move>, ChessError> {
        let color = game_state.side_to_move();
        self.last_result = self.search.search(game_state, color)?;
        Ok(self.last_result.map(|result| result.best_move))
    }
}
