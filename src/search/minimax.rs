//! Fixed-depth minimax with alpha-beta pruning.
//!
//! The search walks one shared board with apply/undo. Every frame undoes its
//! own move before looking at the child's result, so an evaluator error
//! reaches the caller with the board exactly as it was handed in.
//!
//! White maximizes and Black minimizes; the evaluator scores from White's
//! point of view. Leaves are positions at depth zero or with no legal moves,
//! and both are scored by the evaluator alone.

use std::str::FromStr;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::{
    legal_moves_from_pseudo, FastLegalMoveGenerator, LegalMoveGenerator,
};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::search::board_scoring::Evaluator;

pub const DEFAULT_SEARCH_DEPTH: u8 = 2;

pub const ENV_SEARCH_DEPTH: &str = "TERN_SEARCH_DEPTH";
pub const ENV_SEARCH_SEED: &str = "TERN_SEARCH_SEED";
pub const ENV_SEARCH_PRUNING: &str = "TERN_SEARCH_PRUNING";

/// Order in which sibling moves are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrdering {
    /// Random permutation per node, so equally scored moves vary between
    /// searches.
    Shuffled,
    /// Move-generator order. Makes a search fully reproducible.
    Generated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub pruning: bool,
    pub ordering: MoveOrdering,
    /// Seed for `Shuffled` ordering; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_SEARCH_DEPTH,
            pruning: true,
            ordering: MoveOrdering::Shuffled,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Defaults overridden by `TERN_SEARCH_DEPTH`, `TERN_SEARCH_SEED` and
    /// `TERN_SEARCH_PRUNING`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    /// name. Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(depth) = parse_override::<u8>(&lookup, ENV_SEARCH_DEPTH) {
            config.max_depth = depth;
        }
        if let Some(seed) = parse_override::<u64>(&lookup, ENV_SEARCH_SEED) {
            config.seed = Some(seed);
        }
        if let Some(pruning) = parse_override::<bool>(&lookup, ENV_SEARCH_PRUNING) {
            config.pruning = pruning;
        }

        config
    }
}

fn parse_override<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: f64,
    pub depth: u8,
    pub nodes: u64,
    pub cutoffs: u64,
}

#[derive(Debug, Default)]
struct SearchStats {
    nodes: u64,
    cutoffs: u64,
}

pub struct MinimaxSearch<E: Evaluator> {
    evaluator: E,
    config: SearchConfig,
    rng: StdRng,
}

impl<E: Evaluator> MinimaxSearch<E> {
    pub fn new(evaluator: E, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            evaluator,
            config,
            rng,
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    #[inline]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Best move for `color` at the configured depth.
    pub fn search(
        &mut self,
        game_state: &mut GameState,
        color: Color,
    ) -> MoveGenResult<Option<SearchResult>> {
        self.best_move(game_state, color, self.config.max_depth)
    }

    /// Best move for `color` searching `depth` plies, or `None` when `color`
    /// has no legal move. A depth of zero is searched as one ply so that a
    /// move is always chosen. Among equally scored moves the first one
    /// visited wins. `color` must be the side to move.
    pub fn best_move(
        &mut self,
        game_state: &mut GameState,
        color: Color,
        depth: u8,
    ) -> MoveGenResult<Option<SearchResult>> {
        let depth = depth.max(1);
        let mut stats = SearchStats {
            nodes: 1,
            cutoffs: 0,
        };

        let mut moves = self.node_moves(game_state, color, None, depth)?;
        if moves.is_empty() {
            debug!("search: {color:?} has no legal moves");
            return Ok(None);
        }
        self.order(&mut moves);

        let maximizing = color == Color::White;
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best: Option<(Move, f64)> = None;

        for generated in moves {
            let record = game_state.apply_move(generated.mv)?;
            let value = self.minimax(
                game_state,
                color.opposite(),
                depth - 1,
                alpha,
                beta,
                generated.opponent_replies,
                &mut stats,
            );
            game_state.undo_move(&record);
            let value = value?;

            let improves = match best {
                None => true,
                Some((_, best_value)) if maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some((generated.mv, value));
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
        }

        let Some((best_move, score)) = best else {
            return Ok(None);
        };

        debug!(
            "search: {color:?} depth {depth} best {best_move} score {score:.3} nodes {}",
            stats.nodes
        );
        trace!("search: {} alpha-beta cutoffs", stats.cutoffs);

        Ok(Some(SearchResult {
            best_move,
            score,
            depth,
            nodes: stats.nodes,
            cutoffs: stats.cutoffs,
        }))
    }

    /// Minimax value of the current position with `color` to move, using
    /// the full window.
    pub fn evaluate_position(
        &mut self,
        game_state: &mut GameState,
        color: Color,
        depth: u8,
    ) -> MoveGenResult<f64> {
        let mut stats = SearchStats::default();
        self.minimax(
            game_state,
            color,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            None,
            &mut stats,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        game_state: &mut GameState,
        color: Color,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        cached_replies: Option<Vec<Move>>,
        stats: &mut SearchStats,
    ) -> MoveGenResult<f64> {
        stats.nodes += 1;

        if depth == 0 {
            return Ok(self.evaluator.score(game_state)?);
        }

        let mut moves = self.node_moves(game_state, color, cached_replies, depth)?;
        if moves.is_empty() {
            return Ok(self.evaluator.score(game_state)?);
        }
        self.order(&mut moves);

        let maximizing = color == Color::White;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for generated in moves {
            let record = game_state.apply_move(generated.mv)?;
            let value = self.minimax(
                game_state,
                color.opposite(),
                depth - 1,
                alpha,
                beta,
                generated.opponent_replies,
                stats,
            );
            game_state.undo_move(&record);
            let value = value?;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if self.config.pruning && beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }

    /// Legal moves at a node `depth` plies from the horizon. Reply lists are
    /// kept only when the children will expand their own moves.
    fn node_moves(
        &self,
        game_state: &mut GameState,
        color: Color,
        cached_replies: Option<Vec<Move>>,
        depth: u8,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        let keep_replies = depth >= 2;
        match cached_replies {
            Some(replies) => legal_moves_from_pseudo(game_state, color, &replies, keep_replies),
            None if keep_replies => LegalMoveGenerator.generate_legal_moves(game_state, color),
            None => FastLegalMoveGenerator.generate_legal_moves(game_state, color),
        }
    }

    fn order(&mut self, moves: &mut [GeneratedMove]) {
        if self.config.ordering == MoveOrdering::Shuffled {
            moves.shuffle(&mut self.rng);
        }
    }
}
