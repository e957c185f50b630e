//! Move-path enumeration for validating move generation.
//!
//! Walks the legal move tree in place with apply/undo and tallies leaf
//! statistics. Promotions count once each since only queens are generated.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Perft from the side to move.
pub fn perft(game_state: &mut GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    let color = game_state.side_to_move();
    perft_recurse(game_state, color, depth)
}

/// Per-root-move node counts, for locating generator bugs.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> MoveGenResult<Vec<(Move, usize)>> {
    let color = game_state.side_to_move();
    let moves = FastLegalMoveGenerator.generate_legal_moves(game_state, color)?;
    let mut out = Vec::with_capacity(moves.len());

    for generated in moves {
        let record = game_state.apply_move(generated.mv)?;
        let counts = perft_recurse(game_state, color.opposite(), depth.saturating_sub(1));
        game_state.undo_move(&record);
        out.push((generated.mv, counts?.nodes));
    }

    Ok(out)
}

fn perft_recurse(game_state: &mut GameState, color: Color, depth: u8) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let moves = FastLegalMoveGenerator.generate_legal_moves(game_state, color)?;
    let mut total = PerftCounts::default();

    for generated in moves {
        let record = game_state.apply_move(generated.mv)?;

        let result = if depth == 1 {
            leaf_counts(game_state, &record)
        } else {
            perft_recurse(game_state, color.opposite(), depth - 1)
        };

        game_state.undo_move(&record);
        total.merge(result?);
    }

    Ok(total)
}

fn leaf_counts(game_state: &mut GameState, record: &MoveRecord) -> MoveGenResult<PerftCounts> {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if record.captured_piece.is_some() {
        counts.captures += 1;
    }
    match record.kind {
        MoveKind::EnPassant => counts.en_passant += 1,
        MoveKind::Castle => counts.castles += 1,
        MoveKind::Promotion => counts.promotions += 1,
        MoveKind::Normal => {}
    }

    let defender = record.mv.color.opposite();
    if is_king_in_check(game_state, defender) {
        counts.checks += 1;
        let replies = FastLegalMoveGenerator.generate_legal_moves(game_state, defender)?;
        if replies.is_empty() {
            counts.checkmates += 1;
        }
    }

    Ok(counts)
}
