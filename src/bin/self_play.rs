//! Minimax engine playing itself, or a random mover, from the start position.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --vs-random --games 4`
//!
//! Search settings come from `TERN_SEARCH_DEPTH`, `TERN_SEARCH_SEED` and
//! `TERN_SEARCH_PRUNING`; log verbosity from `RUST_LOG` (default `info`).

use std::io::Write;

use log::{info, warn};

use tern_chess::chess_errors::ChessError;
use tern_chess::engines::engine_minimax::MinimaxEngine;
use tern_chess::engines::engine_random::RandomEngine;
use tern_chess::engines::engine_trait::Engine;
use tern_chess::game_state::game_state::GameState;
use tern_chess::search::minimax::SearchConfig;
use tern_chess::utils::engine_match_harness::{
    play_engine_match, play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use tern_chess::utils::render_game_state::render_game_state;

fn main() -> Result<(), ChessError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .init();

    let args: Vec<String> = std::env::args().collect();
    let vs_random = args.iter().any(|a| a == "--vs-random");
    let games = parse_games(&args);

    let search_config = SearchConfig::from_env();
    info!(
        "search depth {} pruning {} seed {:?}",
        search_config.max_depth,
        search_config.pruning,
        search_config.seed
    );

    let opponent = move || -> Box<dyn Engine> {
        if vs_random {
            Box::new(RandomEngine::new())
        } else {
            Box::new(MinimaxEngine::material(search_config))
        }
    };

    if let Some(games) = games {
        let stats = play_engine_match_series(
            || Box::new(MinimaxEngine::material(search_config)) as Box<dyn Engine>,
            opponent,
            MatchSeriesConfig {
                games,
                base_seed: search_config.seed.unwrap_or(0),
                ..MatchSeriesConfig::default()
            },
        )?;
        println!("{}", stats.report());
        return Ok(());
    }

    let mut white = MinimaxEngine::material(search_config);
    let mut black = opponent();
    let result = play_engine_match(
        &mut white,
        black.as_mut(),
        GameState::new_game(),
        search_config.seed.unwrap_or(0),
        MatchConfig::default(),
    )?;

    println!("{}", render_game_state(&result.final_state));
    println!("moves: {}", result.played_moves_lan.join(" "));
    println!("{}", result.report());
    Ok(())
}

/// Game count from `--games N`. A missing or malformed count is reported and
/// a single game is played instead.
fn parse_games(args: &[String]) -> Option<u16> {
    let index = args.iter().position(|a| a == "--games")?;
    let Some(value) = args.get(index + 1) else {
        warn!("--games needs a count; playing a single game");
        return None;
    };
    match value.parse::<u16>() {
        Ok(games) if games > 0 => Some(games),
        _ => {
            warn!("invalid --games value {value:?}; playing a single game");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn games_flag_reads_its_count() {
        assert_eq!(parse_games(&args(&["self_play", "--games", "6"])), Some(6));
        assert_eq!(parse_games(&args(&["self_play", "--vs-random"])), None);
    }

    #[test]
    fn malformed_games_count_falls_back_to_one_game() {
        assert_eq!(parse_games(&args(&["self_play", "--games", "abc"])), None);
        assert_eq!(parse_games(&args(&["self_play", "--games", "0"])), None);
        assert_eq!(parse_games(&args(&["self_play", "--games"])), None);
    }
}
