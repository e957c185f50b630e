use crate::game_state::chess_types::*;

/// Special-case handling a move needed when it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Castle,
    EnPassant,
    Promotion,
}

/// Single undo record for `apply_move` / `undo_move`.
///
/// Every `prev_*` field is a snapshot taken before the move touched the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub kind: MoveKind,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_side_to_move: Color,
}

impl MoveRecord {
    /// Square the captured piece stood on. Differs from the destination only
    /// for en passant.
    #[inline]
    pub fn capture_square(&self) -> Square {
        match self.kind {
            MoveKind::EnPassant => Square::new(self.mv.from.row(), self.mv.to.col()),
            _ => self.mv.to,
        }
    }
}

/// Make/unmake stack. Records are pushed by `apply_move` and popped by
/// `undo_move`, strictly last-in first-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// Remove the most recent record.
    ///
    /// Panics on an empty history: undoing a move that was never applied is a
    /// caller bug, not a recoverable condition.
    #[inline]
    pub fn pop(&mut self) -> MoveRecord {
        self.records
            .pop()
            .expect("undo requested with an empty move history")
    }

    #[inline]
    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(kind: MoveKind) -> MoveRecord {
        MoveRecord {
            mv: Move::new(Square::new(4, 4), Square::new(5, 3), Color::White),
            kind,
            moved_piece: Piece::new(Color::White, PieceKind::Pawn),
            captured_piece: Some(Piece::new(Color::Black, PieceKind::Pawn)),
            prev_castling_rights: CASTLE_ALL,
            prev_en_passant_square: Some(Square::new(5, 3)),
            prev_halfmove_clock: 0,
            prev_fullmove_number: 3,
            prev_side_to_move: Color::White,
        }
    }

    #[test]
    fn en_passant_capture_square_is_beside_the_origin() {
        let record = sample_record(MoveKind::EnPassant);
        assert_eq!(record.capture_square(), Square::new(4, 3));

        let record = sample_record(MoveKind::Normal);
        assert_eq!(record.capture_square(), Square::new(5, 3));
    }

    #[test]
    fn history_is_last_in_first_out() {
        let mut history = MoveHistory::new();
        history.push(sample_record(MoveKind::Normal));
        history.push(sample_record(MoveKind::EnPassant));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().kind, MoveKind::EnPassant);
        assert_eq!(history.pop().kind, MoveKind::Normal);
        assert!(history.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty move history")]
    fn popping_empty_history_panics() {
        MoveHistory::new().pop();
    }
}
