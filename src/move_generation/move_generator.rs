use crate::chess_errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

pub type MoveGenResult<T> = Result<T, ChessError>;

/// Whether king move generation should add castling candidates.
///
/// Attack tests always skip castling: it never captures, and its own safety
/// check would otherwise recurse into another attack test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingMode {
    Include,
    Skip,
}

/// A legal move, optionally carrying the opponent's pseudo-legal replies
/// (without castling) computed in the position the move leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMove {
    pub mv: Move,
    pub opponent_replies: Option<Vec<Move>>,
}

pub trait MoveGenerator {
    /// Legal moves for `color`. The board is mutated while filtering and is
    /// restored before returning.
    fn generate_legal_moves(
        &self,
        game_state: &mut GameState,
        color: Color,
    ) -> MoveGenResult<Vec<GeneratedMove>>;
}

/// Pseudo-legal moves for `color`, ignoring whether its own king is left in
/// check. Dispatches on piece kind per occupied square.
pub fn generate_pseudo_legal_moves(
    game_state: &GameState,
    color: Color,
    castling: CastlingMode,
    out: &mut Vec<Move>,
) {
    for (from, piece) in game_state.pieces_of(color) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(game_state, color, from, out),
            PieceKind::Knight => generate_knight_moves(game_state, color, from, out),
            PieceKind::Bishop => generate_bishop_moves(game_state, color, from, out),
            PieceKind::Rook => generate_rook_moves(game_state, color, from, out),
            PieceKind::Queen => generate_queen_moves(game_state, color, from, out),
            PieceKind::King => generate_king_moves(game_state, color, from, castling, out),
        }
    }
}

#[inline]
pub fn pseudo_legal_moves(game_state: &GameState, color: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, color, CastlingMode::Include, &mut out);
    out
}
