use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_step_moves;
use crate::move_generation::move_generator::CastlingMode;
use crate::moves::king_moves::king_targets;

pub fn generate_king_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    castling: CastlingMode,
    out: &mut Vec<Move>,
) {
    push_step_moves(game_state, color, from, king_targets(from), out);

    if castling == CastlingMode::Include {
        generate_castling_moves(game_state, color, out);
    }
}

/// Castling candidates for `color`: right still held, king and rook on their
/// home squares, the squares between them empty, and none of the squares the
/// king stands on or crosses attacked.
pub fn generate_castling_moves(game_state: &GameState, color: Color, out: &mut Vec<Move>) {
    let enemy = color.opposite();
    let king = Piece::new(color, PieceKind::King);
    let rook = Piece::new(color, PieceKind::Rook);

    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == color) {
        if !game_state.has_castling_right(lane.right)
            || game_state.piece_at(lane.king_from) != Some(king)
            || game_state.piece_at(lane.rook_from) != Some(rook)
        {
            continue;
        }

        let row = lane.king_from.row();
        let path_clear = lane
            .must_be_empty
            .iter()
            .all(|&col| game_state.piece_at(Square::new(row, col)).is_none());
        if !path_clear {
            continue;
        }

        let path_safe = lane
            .must_not_be_attacked
            .iter()
            .all(|&col| !is_square_attacked(game_state, Square::new(row, col), enemy));
        if path_safe {
            out.push(Move::new(lane.king_from, lane.king_to, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castles(fen: &str, color: Color) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_castling_moves(&game, color, &mut out);
        out
    }

    #[test]
    fn both_sides_castle_when_clear_and_safe() {
        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Color::White);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Move::new(Square::new(0, 4), Square::new(0, 6), Color::White)));
        assert!(moves.contains(&Move::new(Square::new(0, 4), Square::new(0, 2), Color::White)));

        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", Color::Black);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn missing_right_blocks_castling() {
        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1", Color::White);
        assert_eq!(
            moves,
            vec![Move::new(Square::new(0, 4), Square::new(0, 2), Color::White)]
        );
    }

    #[test]
    fn occupied_path_blocks_castling() {
        let moves = castles("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1", Color::White);
        assert!(moves.is_empty());
    }

    #[test]
    fn attacked_transit_square_blocks_castling() {
        // Black rook on f8 covers f1; queenside still fine.
        let moves = castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", Color::White);
        assert_eq!(
            moves,
            vec![Move::new(Square::new(0, 4), Square::new(0, 2), Color::White)]
        );
    }

    #[test]
    fn king_in_check_cannot_castle() {
        let moves = castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", Color::White);
        assert!(moves.is_empty());
    }

    #[test]
    fn pawn_diagonal_covers_an_empty_transit_square() {
        // Black pawn on e2 attacks d1 and f1.
        let moves = castles("4k3/8/8/8/8/8/4p3/R3K2R w KQ - 0 1", Color::White);
        assert!(moves.is_empty());
    }

    #[test]
    fn attacked_b_file_square_does_not_block_queenside() {
        // Only the king's path matters; b1 may be attacked.
        let moves = castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", Color::White);
        assert_eq!(moves.len(), 1);
    }
}
