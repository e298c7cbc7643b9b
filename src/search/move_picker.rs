use crate::prelude::*;
use crate::search::move_ordering::{HistoryTable, score_move};

/// Picks moves one at a time without fully sorting: all moves are scored
/// once upfront, then each call to `next_best` does an O(n) selection of
/// the best remaining move. Cheaper than sorting when beta cutoffs arrive
/// early, which good ordering makes common.
pub struct MovePicker<'a> {
    moves: &'a mut [Move],
    scores: [i32; MAX_MOVES],
    current: usize,
}

impl<'a> MovePicker<'a> {
    pub fn new(
        moves: &'a mut [Move],
        killers: &[Option<Move>; 2],
        tt_move: Option<Move>,
        history: &HistoryTable,
    ) -> Self {
        debug_assert!(moves.len() <= MAX_MOVES, "too many moves");

        let mut scores = [0i32; MAX_MOVES];
        for (i, &mv) in moves.iter().enumerate() {
            scores[i] = score_move(mv, killers, tt_move, history);
        }

        Self {
            moves,
            scores,
            current: 0,
        }
    }

    /// Capture-ordering-only constructor for quiescence, where the killer
    /// and history tables would add nothing.
    pub fn new_qsearch(moves: &'a mut [Move]) -> Self {
        Self::new(moves, &[None; 2], None, &EMPTY_HISTORY)
    }

    /// Returns the next best move, or `None` when every move was picked.
    #[inline]
    pub fn next_best(&mut self) -> Option<Move> {
        if self.current >= self.moves.len() {
            return None;
        }

        let mut best_idx = self.current;
        let mut best_score = self.scores[self.current];
        for i in (self.current + 1)..self.moves.len() {
            if self.scores[i] > best_score {
                best_score = self.scores[i];
                best_idx = i;
            }
        }

        self.moves.swap(self.current, best_idx);
        self.scores.swap(self.current, best_idx);

        let result = self.moves[self.current];
        self.current += 1;
        Some(result)
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.moves.len().saturating_sub(self.current)
    }
}

static EMPTY_HISTORY: HistoryTable = [[0; NUM_SQUARES]; NUM_SQUARES];

impl Iterator for MovePicker<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_best()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MovePicker<'_> {
    fn len(&self) -> usize {
        self.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_every_move_exactly_once() {
        let board = Board::new();
        let mut moves = MoveBuffer::new();
        move_gen::generate_moves(&board, board.stm, &mut moves);

        let total = moves.len();
        let mut picker = MovePicker::new(moves.as_mut_slice(), &[None; 2], None, &EMPTY_HISTORY);

        let mut picked = Vec::new();
        while let Some(mv) = picker.next_best() {
            picked.push(mv);
        }
        assert_eq!(picked.len(), total);

        let mut seen = std::collections::HashSet::new();
        for mv in picked {
            assert!(seen.insert(mv.notation()), "duplicate move picked");
        }
    }

    #[test]
    fn tt_move_comes_first() {
        let board = Board::new();
        let mut moves = MoveBuffer::new();
        move_gen::generate_moves(&board, board.stm, &mut moves);

        let tt_move = *moves.first().unwrap();
        let mut picker =
            MovePicker::new(moves.as_mut_slice(), &[None; 2], Some(tt_move), &EMPTY_HISTORY);
        assert_eq!(picker.next_best(), Some(tt_move));
    }

    #[test]
    fn longer_captures_first_in_qsearch_order() {
        // Red man on 33 can take one piece via 28, or start elsewhere; build
        // a position with both a single and a double capture for red.
        let board = Board::from_position("R:R33,42:B29,19").unwrap();
        let mut moves = MoveBuffer::new();
        move_gen::generate_moves(&board, board.stm, &mut moves);

        // Mandatory maximal rule already filters to the longest chains here,
        // so simply check picker yields captures in non-increasing length.
        let mut picker = MovePicker::new_qsearch(moves.as_mut_slice());
        let mut last = usize::MAX;
        while let Some(mv) = picker.next_best() {
            assert!(mv.capture_count() <= last);
            last = mv.capture_count();
        }
    }
}
