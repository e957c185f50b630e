//! Engine-vs-engine games and series, played through a game session.
//!
//! Runs two `Engine` implementations against each other through a
//! [`GameSession`], with an optional seeded random opening prefix so repeated
//! games between deterministic engines still differ.

use std::time::Instant;

use log::{debug, info};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chess_errors::ChessError;
use crate::engines::engine_trait::Engine;
use crate::game_session::GameSession;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::game_status::GameStatus;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::WhiteWinCheckmate => Some(Color::White),
            MatchOutcome::BlackWinCheckmate => Some(Color::Black),
            MatchOutcome::DrawStalemate | MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Plies played by the engines before the game is called a draw.
    pub max_plies: u16,
    /// Random legal moves played before the engines take over.
    pub opening_random_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_random_plies: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves_lan: Vec<String>,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

impl MatchResult {
    pub fn report(&self) -> String {
        format!(
            "outcome={:?} plies={} white_avg_ms={:.3} black_avg_ms={:.3} fen={}",
            self.outcome,
            self.played_moves_lan.len(),
            average_ms(self.white_total_time_ns, self.white_move_count),
            average_ms(self.black_total_time_ns, self.black_move_count),
            self.final_state.get_fen()
        )
    }
}

fn average_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        total_ns as f64 / f64::from(moves) / 1_000_000.0
    }
}

/// Play one game from `start_state`.
///
/// `engine_white` is White, `engine_black` is Black. `seed` only drives the
/// random opening prefix.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    start_state: GameState,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, ChessError> {
    engine_white.new_game();
    engine_black.new_game();

    let mut session = GameSession::from_game_state(start_state)?;
    let opening_moves_lan = apply_seeded_random_opening(&mut session, seed, config.opening_random_plies)?;

    let mut played_moves_lan = Vec::<String>::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    for _ in 0..config.max_plies {
        if session.status().is_terminal() {
            break;
        }

        let mover = session.side_to_move();
        let before = session.game_state().clone();
        let started = Instant::now();
        let chosen = match mover {
            Color::White => session.engine_move(engine_white)?,
            Color::Black => session.engine_move(engine_black)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let Some(mv) = chosen else {
            break;
        };
        let lan = move_to_long_algebraic(mv, &before);
        debug!("match: {mover:?} plays {lan}");
        played_moves_lan.push(lan);
    }

    let outcome = match session.status() {
        GameStatus::Checkmate => match session.side_to_move() {
            Color::White => MatchOutcome::BlackWinCheckmate,
            Color::Black => MatchOutcome::WhiteWinCheckmate,
        },
        GameStatus::Stalemate => MatchOutcome::DrawStalemate,
        GameStatus::Ongoing => MatchOutcome::DrawMaxPlies,
    };

    info!(
        "match finished: {} (White) vs {} (Black) -> {:?} after {} plies",
        engine_white.name(),
        engine_black.name(),
        outcome,
        played_moves_lan.len()
    );

    Ok(MatchResult {
        outcome,
        final_state: session.game_state().clone(),
        opening_moves_lan,
        played_moves_lan,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
    })
}

fn apply_seeded_random_opening(
    session: &mut GameSession,
    seed: u64,
    plies: u8,
) -> Result<Vec<String>, ChessError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(usize::from(plies));

    for _ in 0..plies {
        let legal = session.legal_moves();
        let Some(&mv) = legal.choose(&mut rng) else {
            break;
        };
        out.push(move_to_long_algebraic(mv, session.game_state()));
        session.play(mv)?;
    }

    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 4,
            base_seed: 0,
            per_game: MatchConfig {
                opening_random_plies: 4,
                ..MatchConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={}",
            self.games, self.player1_wins, self.player2_wins, self.draws
        )
    }
}

/// Play a series of games from the standard start and tally the results.
///
/// Player colors are drawn per game from `base_seed`.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, ChessError>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        let result = if player1_is_white {
            play_engine_match(
                player1.as_mut(),
                player2.as_mut(),
                GameState::new_game(),
                seed,
                config.per_game,
            )?
        } else {
            play_engine_match(
                player2.as_mut(),
                player1.as_mut(),
                GameState::new_game(),
                seed,
                config.per_game,
            )?
        };

        let player1_color = if player1_is_white {
            Color::White
        } else {
            Color::Black
        };
        match result.outcome.winner() {
            Some(color) if color == player1_color => stats.player1_wins += 1,
            Some(_) => stats.player2_wins += 1,
            None => stats.draws += 1,
        }
        info!("series game {}/{}: {}", i + 1, config.games, result.report());
    }

    Ok(stats)
}
