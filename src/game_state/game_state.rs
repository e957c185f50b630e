//! Core mutable board representation.
//!
//! `GameState` is the central model for the engine: a 64-entry mailbox of
//! optional pieces, a king-location cache, side/rights/en-passant flags, clocks,
//! and the make/unmake history. All mutation goes through `apply_move` and
//! `undo_move` (see `move_generation::legal_move_apply`), which keep the caches
//! consistent with the mailbox.

use crate::chess_errors::ChessError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Mailbox game state mutated in place by make/unmake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Placement ---
    pub(crate) squares: [Option<Piece>; 64],
    // [color]
    pub(crate) king_squares: [Square; 2],

    // --- Side and state flags ---
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    // --- Make/unmake stack ---
    pub(crate) history: MoveHistory,
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Assemble a position from raw parts, locating and validating the kings.
    pub fn from_parts(
        squares: [Option<Piece>; 64],
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Result<Self, ChessError> {
        let king_squares = [
            locate_single_king(&squares, Color::White)?,
            locate_single_king(&squares, Color::Black)?,
        ];

        Ok(Self {
            squares,
            king_squares,
            side_to_move,
            castling_rights,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
            history: MoveHistory::new(),
        })
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Occupied squares of `color`, in square-index order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.squares[sq.index()] {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// True when every piece, cache, and flag matches `other`. Ignores history.
    pub fn same_position(&self, other: &GameState) -> bool {
        self.squares == other.squares
            && self.king_squares == other.king_squares
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }

    /// Panic if the king cache disagrees with the mailbox or a color does
    /// not have exactly one king.
    pub fn assert_king_invariant(&self) {
        for color in [Color::White, Color::Black] {
            let located = locate_single_king(&self.squares, color)
                .unwrap_or_else(|e| panic!("king invariant violated: {e}"));
            assert_eq!(
                located,
                self.king_squares[color.index()],
                "king cache out of sync for {color:?}"
            );
        }
    }
}

fn locate_single_king(squares: &[Option<Piece>; 64], color: Color) -> Result<Square, ChessError> {
    let king = Piece::new(color, PieceKind::King);
    let mut found = squares
        .iter()
        .enumerate()
        .filter(|(_, occupant)| **occupant == Some(king))
        .map(|(index, _)| Square::from_index(index));

    let first = found.next().ok_or(ChessError::MissingKing(color))?;
    if found.next().is_some() {
        return Err(ChessError::MultipleKings(color));
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_caches_both_kings() {
        let game = GameState::new_game();
        assert_eq!(game.king_square(Color::White), Square::new(0, 4));
        assert_eq!(game.king_square(Color::Black), Square::new(7, 4));
        assert_eq!(game.pieces_of(Color::White).count(), 16);
        assert_eq!(game.pieces_of(Color::Black).count(), 16);
        game.assert_king_invariant();
    }

    #[test]
    fn from_parts_rejects_missing_or_duplicate_kings() {
        let mut squares = [None; 64];
        squares[Square::new(0, 4).index()] = Some(Piece::new(Color::White, PieceKind::King));
        let err = GameState::from_parts(squares, Color::White, 0, None, 0, 1)
            .expect_err("missing black king should be rejected");
        assert!(matches!(err, ChessError::MissingKing(Color::Black)));

        squares[Square::new(7, 4).index()] = Some(Piece::new(Color::Black, PieceKind::King));
        squares[Square::new(7, 0).index()] = Some(Piece::new(Color::Black, PieceKind::King));
        let err = GameState::from_parts(squares, Color::White, 0, None, 0, 1)
            .expect_err("two black kings should be rejected");
        assert!(matches!(err, ChessError::MultipleKings(Color::Black)));
    }
}
