//! In-place make/unmake.
//!
//! `apply_move` mutates the board and pushes a `MoveRecord`; `undo_move` pops
//! it and restores the exact prior position. Search and legality filtering
//! depend on this pair being a perfect inverse.

use crate::chess_errors::ChessError;
use crate::game_state::chess_rules::{castling_lane_for_king_move, castling_right_for_rook_home, castling_rights_for_color};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::pawn_moves::pawn_promotion_row;

impl GameState {
    /// Apply `mv` without checking legality. See [`apply_move`].
    #[inline]
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveRecord, ChessError> {
        apply_move(self, mv)
    }

    /// Revert `record`, which must be the most recent move applied.
    #[inline]
    pub fn undo_move(&mut self, record: &MoveRecord) {
        undo_move(self, record)
    }

    /// Revert the most recent move and return its record.
    pub fn undo_last_move(&mut self) -> MoveRecord {
        let record = *self
            .history
            .last()
            .expect("undo requested with an empty move history");
        undo_move(self, &record);
        record
    }

    /// Apply `mv` only if it is in the legal-move set of the side to move.
    pub fn play_legal_move(&mut self, mv: Move) -> Result<MoveRecord, ChessError> {
        let color = self.side_to_move();
        if mv.color != color || !legal_moves(self, color)?.contains(&mv) {
            return Err(ChessError::IllegalMove(mv));
        }
        apply_move(self, mv)
    }
}

pub fn apply_move(game_state: &mut GameState, mv: Move) -> Result<MoveRecord, ChessError> {
    if mv.color != game_state.side_to_move {
        return Err(ChessError::IllegalMove(mv));
    }
    let moved_piece = match game_state.piece_at(mv.from) {
        Some(piece) if piece.color == mv.color => piece,
        _ => {
            return Err(ChessError::NoPieceToMove {
                square: mv.from,
                color: mv.color,
            })
        }
    };
    if matches!(game_state.piece_at(mv.to), Some(piece) if piece.color == mv.color) {
        return Err(ChessError::IllegalMove(mv));
    }

    let kind = classify_move(game_state, mv, moved_piece);
    let capture_square = match kind {
        MoveKind::EnPassant => Square::new(mv.from.row(), mv.to.col()),
        _ => mv.to,
    };
    let captured_piece = game_state.piece_at(capture_square);
    assert!(
        !matches!(captured_piece, Some(piece) if piece.kind == PieceKind::King),
        "move {mv} would capture a king"
    );

    let record = MoveRecord {
        mv,
        kind,
        moved_piece,
        captured_piece,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_side_to_move: game_state.side_to_move,
    };

    // Lift the mover and whatever it captures.
    game_state.squares[mv.from.index()] = None;
    game_state.squares[capture_square.index()] = None;

    let placed = match kind {
        MoveKind::Promotion => Piece::new(mv.color, PieceKind::Queen),
        _ => moved_piece,
    };
    game_state.squares[mv.to.index()] = Some(placed);

    if kind == MoveKind::Castle {
        if let Some(lane) = castling_lane_for_king_move(mv.from, mv.to) {
            let rook = game_state.squares[lane.rook_from.index()].take();
            game_state.squares[lane.rook_to.index()] = rook;
        }
    }

    if moved_piece.kind == PieceKind::King {
        game_state.king_squares[mv.color.index()] = mv.to;
    }

    update_castling_rights(game_state, moved_piece, mv.from, mv.to);

    game_state.en_passant_square = if moved_piece.kind == PieceKind::Pawn
        && mv.from.row().abs_diff(mv.to.row()) == 2
    {
        Some(Square::new((mv.from.row() + mv.to.row()) / 2, mv.from.col()))
    } else {
        None
    };

    if moved_piece.kind == PieceKind::Pawn || captured_piece.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mv.color == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = mv.color.opposite();
    game_state.history.push(record);

    Ok(record)
}

pub fn undo_move(game_state: &mut GameState, record: &MoveRecord) {
    let top = game_state.history.pop();
    assert_eq!(
        &top, record,
        "undo record does not match the most recent move"
    );

    let mv = top.mv;

    if top.kind == MoveKind::Castle {
        if let Some(lane) = castling_lane_for_king_move(mv.from, mv.to) {
            let rook = game_state.squares[lane.rook_to.index()].take();
            game_state.squares[lane.rook_from.index()] = rook;
        }
    }

    game_state.squares[mv.to.index()] = None;
    game_state.squares[mv.from.index()] = Some(top.moved_piece);
    if let Some(captured) = top.captured_piece {
        game_state.squares[top.capture_square().index()] = Some(captured);
    }

    if top.moved_piece.kind == PieceKind::King {
        game_state.king_squares[mv.color.index()] = mv.from;
    }

    game_state.castling_rights = top.prev_castling_rights;
    game_state.en_passant_square = top.prev_en_passant_square;
    game_state.halfmove_clock = top.prev_halfmove_clock;
    game_state.fullmove_number = top.prev_fullmove_number;
    game_state.side_to_move = top.prev_side_to_move;
}

fn classify_move(game_state: &GameState, mv: Move, moved_piece: Piece) -> MoveKind {
    match moved_piece.kind {
        PieceKind::Pawn if mv.to.row() == pawn_promotion_row(mv.color) => MoveKind::Promotion,
        PieceKind::Pawn
            if mv.from.col() != mv.to.col()
                && game_state.piece_at(mv.to).is_none()
                && game_state.en_passant_square == Some(mv.to) =>
        {
            MoveKind::EnPassant
        }
        PieceKind::King if is_castle(game_state, mv) => MoveKind::Castle,
        _ => MoveKind::Normal,
    }
}

// A two-file king step only castles with the mover's rook at home and the
// rook's landing square empty; anything else is a plain king move.
fn is_castle(game_state: &GameState, mv: Move) -> bool {
    castling_lane_for_king_move(mv.from, mv.to).is_some_and(|lane| {
        lane.color == mv.color
            && game_state.piece_at(lane.rook_from) == Some(Piece::new(mv.color, PieceKind::Rook))
            && game_state.piece_at(lane.rook_to).is_none()
    })
}

fn update_castling_rights(game_state: &mut GameState, moved_piece: Piece, from: Square, to: Square) {
    if moved_piece.kind == PieceKind::King {
        game_state.castling_rights &= !castling_rights_for_color(moved_piece.color);
    }

    // A rook leaving its home square, or anything landing on one, ends that
    // castling direction for good.
    for square in [from, to] {
        if let Some(right) = castling_right_for_rook_home(square) {
            game_state.castling_rights &= !right;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("square should parse")
    }

    fn mv(game: &GameState, from: &str, to: &str) -> Move {
        let piece = game.piece_at(sq(from)).expect("origin should hold a piece");
        Move::new(sq(from), sq(to), piece.color)
    }

    fn assert_round_trip(fen: &str, from: &str, to: &str) -> MoveRecord {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        let m = mv(&game, from, to);
        let record = game.apply_move(m).expect("move should apply");
        game.assert_king_invariant();
        game.undo_move(&record);
        assert_eq!(game, before);
        record
    }

    #[test]
    fn double_push_opens_en_passant_window_for_one_ply() {
        let mut game = GameState::new_game();
        let first = mv(&game, "e2", "e4");
        game.apply_move(first).expect("e2e4 should apply");
        assert_eq!(game.en_passant_square(), Some(sq("e3")));
        assert_eq!(game.side_to_move(), Color::Black);

        let reply = mv(&game, "g8", "f6");
        game.apply_move(reply).expect("Nf6 should apply");
        assert_eq!(game.en_passant_square(), None);

        let single = mv(&game, "d2", "d3");
        game.apply_move(single).expect("d3 should apply");
        assert_eq!(game.en_passant_square(), None);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        let capture = mv(&game, "e5", "d6");
        let record = game.apply_move(capture).expect("en passant should apply");

        assert_eq!(record.kind, MoveKind::EnPassant);
        assert_eq!(record.captured_piece, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(game.piece_at(sq("d5")), None);
        assert_eq!(game.piece_at(sq("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));

        game.undo_move(&record);
        assert_eq!(game.piece_at(sq("d5")), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(game.piece_at(sq("d6")), None);
        assert_eq!(game.en_passant_square(), Some(sq("d6")));
    }

    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let castle = mv(&game, "e1", "g1");
        let record = game.apply_move(castle).expect("castle should apply");

        assert_eq!(record.kind, MoveKind::Castle);
        assert_eq!(game.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(game.piece_at(sq("h1")), None);
        assert_eq!(game.king_square(Color::White), sq("g1"));
        assert_eq!(game.castling_rights(), CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);

        game.undo_move(&record);
        assert_eq!(game.piece_at(sq("h1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(game.king_square(Color::White), sq("e1"));
        assert_eq!(game.castling_rights(), CASTLE_ALL);
    }

    #[test]
    fn queenside_castle_round_trips() {
        let record = assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8", "c8");
        assert_eq!(record.kind, MoveKind::Castle);
    }

    #[test]
    fn rook_move_and_rook_capture_clear_single_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let rook_capture = mv(&game, "a1", "a8");
        game.apply_move(rook_capture).expect("Rxa8 should apply");
        assert!(!game.has_castling_right(CASTLE_WHITE_QUEENSIDE));
        assert!(!game.has_castling_right(CASTLE_BLACK_QUEENSIDE));
        assert!(game.has_castling_right(CASTLE_WHITE_KINGSIDE));
        assert!(game.has_castling_right(CASTLE_BLACK_KINGSIDE));

        let king_move = mv(&game, "e8", "d7");
        game.apply_move(king_move).expect("Kd7 should apply");
        assert_eq!(game.castling_rights(), CASTLE_WHITE_KINGSIDE);
    }

    #[test]
    fn rights_never_come_back_after_rook_returns() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        for (from, to) in [("h1", "h2"), ("e8", "e7"), ("h2", "h1"), ("e7", "e8")] {
            let m = mv(&game, from, to);
            game.apply_move(m).expect("shuffle move should apply");
        }
        assert_eq!(game.castling_rights(), CASTLE_WHITE_QUEENSIDE);
    }

    #[test]
    fn promotion_always_yields_a_queen() {
        let mut game = GameState::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let push = mv(&game, "a7", "a8");
        let record = game.apply_move(push).expect("promotion push should apply");
        assert_eq!(record.kind, MoveKind::Promotion);
        assert_eq!(game.piece_at(sq("a8")), Some(Piece::new(Color::White, PieceKind::Queen)));
        game.undo_move(&record);
        assert_eq!(game.piece_at(sq("a7")), Some(Piece::new(Color::White, PieceKind::Pawn)));

        let capture = mv(&game, "a7", "b8");
        let record = game.apply_move(capture).expect("capture promotion should apply");
        assert_eq!(record.kind, MoveKind::Promotion);
        assert_eq!(record.captured_piece, Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert_eq!(game.piece_at(sq("b8")), Some(Piece::new(Color::White, PieceKind::Queen)));
    }

    #[test]
    fn black_promotion_round_trips() {
        let record = assert_round_trip("4k3/8/8/8/8/8/p7/4K3 b - - 0 1", "a2", "a1");
        assert_eq!(record.kind, MoveKind::Promotion);
    }

    #[test]
    fn capture_and_clocks_round_trip() {
        let record = assert_round_trip(
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "f3",
            "e5",
        );
        assert_eq!(record.captured_piece, Some(Piece::new(Color::Black, PieceKind::Pawn)));
    }

    #[test]
    fn moving_from_an_empty_square_is_rejected_without_mutation() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let bogus = Move::new(sq("e4"), sq("e5"), Color::White);
        let err = game.apply_move(bogus).expect_err("empty origin should be rejected");
        assert!(matches!(err, ChessError::NoPieceToMove { .. }));
        assert_eq!(game, before);

        let wrong_color = Move::new(sq("e7"), sq("e5"), Color::White);
        assert!(game.apply_move(wrong_color).is_err());
    }

    #[test]
    fn play_legal_move_rejects_moves_outside_the_legal_set() {
        let mut game = GameState::from_fen("k3r3/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let pinned = mv(&game, "e2", "d3");
        let err = game.play_legal_move(pinned).expect_err("pinned bishop move should be rejected");
        assert!(matches!(err, ChessError::IllegalMove(_)));
        assert!(game.history().is_empty());

        let king_step = mv(&game, "e1", "d1");
        game.play_legal_move(king_step).expect("king step should be legal");
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn moves_out_of_turn_are_rejected_without_mutation() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let black_push = Move::new(sq("e7"), sq("e5"), Color::Black);

        let err = game.play_legal_move(black_push).expect_err("black cannot move first");
        assert!(matches!(err, ChessError::IllegalMove(_)));
        let err = game.apply_move(black_push).expect_err("apply should refuse the wrong side");
        assert!(matches!(err, ChessError::IllegalMove(_)));
        assert!(game.history().is_empty());
        assert_eq!(game, before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn king_jump_without_home_rook_is_not_a_castle() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").expect("FEN should parse");
        let before = game.clone();
        let jump = mv(&game, "e1", "g1");
        let record = game.apply_move(jump).expect("king move should apply");

        assert_eq!(record.kind, MoveKind::Normal);
        assert_eq!(game.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Bishop)));
        game.undo_move(&record);
        assert_eq!(game, before);
    }

    #[test]
    fn undo_last_move_pops_in_order() {
        let mut game = GameState::new_game();
        let start = game.clone();
        let first = mv(&game, "g1", "f3");
        game.apply_move(first).expect("Nf3 should apply");
        let second = mv(&game, "b8", "c6");
        game.apply_move(second).expect("Nc6 should apply");

        assert_eq!(game.undo_last_move().mv, second);
        assert_eq!(game.undo_last_move().mv, first);
        assert_eq!(game, start);
    }

    #[test]
    #[should_panic(expected = "empty move history")]
    fn undo_with_empty_history_panics() {
        let mut game = GameState::new_game();
        game.undo_last_move();
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn undo_out_of_order_panics() {
        let mut game = GameState::new_game();
        let first_mv = mv(&game, "e2", "e4");
        let first = game.apply_move(first_mv).expect("e4 should apply");
        let second_mv = mv(&game, "e7", "e5");
        game.apply_move(second_mv).expect("e5 should apply");
        game.undo_move(&first);
    }
}
