use crate::prelude::*;

/// Whose-turn bookkeeping at the engine boundary. A capture chain that a
/// caller applies one leg at a time leaves the turn half-finished; the
/// state records which piece must keep capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Normal,
    AwaitingContinuation {
        piece: Square,
    },
}

/// Legal moves for the side to move, restricted to the continuing piece's
/// captures while a chain is pending. Generated moves carry fully
/// resolved chains, so in the continuation case the remaining legs are
/// regenerated from the current board.
pub fn legal_moves_with_state(board: &Board, state: TurnState, buffer: &mut MoveBuffer) {
    move_gen::generate_moves(board, board.stm, buffer);
    if let TurnState::AwaitingContinuation { piece } = state {
        buffer.retain(|mv| mv.from == piece && mv.is_capture());
    }
}

/// Picks the move to play. An externally offered `(from, to)` pair is
/// resolved against the legal set first; on validation failure or when no
/// external move is offered, the internal strategy searches. The caller
/// always gets a move while one exists.
pub fn choose_move(
    board: &Board,
    external: Option<(Square, Square)>,
    strategy: &mut dyn MoveStrategy,
) -> Option<Move> {
    if let Some((from, to)) = external {
        match move_gen::resolve_move(board, from, to) {
            Some(mv) => {
                debug!(mv = %mv, "accepted external move");
                return Some(mv);
            }
            None => {
                warn!(%from, %to, "external move failed validation, searching instead");
            }
        }
    }

    let result = strategy.find_best_move(board);
    match result.best_move {
        Some(mv) => Some(mv),
        None => {
            // A strategy that produced nothing despite legal moves
            // existing still must not forfeit; play the first legal move.
            let mut moves = MoveBuffer::new();
            move_gen::generate_moves(board, board.stm, &mut moves);
            moves.first().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_external_move() {
        let board = Board::new();
        let mut strategy = AlphaBetaSearch::new(2);
        let from = Square::from_number(20).unwrap();
        let to = Square::from_number(25).unwrap();
        let mv = choose_move(&board, Some((from, to)), &mut strategy).unwrap();
        assert_eq!(mv.from, from);
        assert_eq!(mv.to, to);
    }

    #[test]
    fn rejects_illegal_external_move_and_searches() {
        let board = Board::new();
        let mut strategy = AlphaBetaSearch::new(2);
        strategy.config.collect_stats = false;
        // 20 to 30 is two rows forward, not a legal step.
        let from = Square::from_number(20).unwrap();
        let to = Square::from_number(30).unwrap();
        let mv = choose_move(&board, Some((from, to)), &mut strategy).unwrap();

        let mut legal = MoveBuffer::new();
        move_gen::generate_moves(&board, board.stm, &mut legal);
        assert!(legal.contains(&mv));
    }

    #[test]
    fn external_capture_resolves_to_full_chain() {
        // Red man on 33 jumps 29 to 24, then must continue over 19 to 13;
        // offering the first leg's endpoints yields nothing because the
        // resolved legal move goes all the way to 13.
        let board = Board::from_position("R:R33:B29,19").unwrap();
        let from = Square::from_number(33).unwrap();

        let full = move_gen::resolve_move(&board, from, Square::from_number(13).unwrap());
        assert!(full.is_some_and(|mv| mv.capture_count() == 2));

        let partial = move_gen::resolve_move(&board, from, Square::from_number(24).unwrap());
        assert!(partial.is_none());
    }

    #[test]
    fn continuation_state_restricts_to_the_chain_piece() {
        // Two red men have single captures, but a pending chain pins the
        // turn to the piece that started it.
        let board = Board::from_position("R:R31,42:B27,38").unwrap();
        let mut all = MoveBuffer::new();
        legal_moves_with_state(&board, TurnState::Normal, &mut all);
        assert_eq!(all.len(), 2);

        let piece = Square::from_number(31).unwrap();
        let mut restricted = MoveBuffer::new();
        legal_moves_with_state(
            &board,
            TurnState::AwaitingContinuation { piece },
            &mut restricted,
        );
        assert!(!restricted.is_empty());
        for mv in &restricted {
            assert_eq!(mv.from, piece);
            assert!(mv.is_capture());
        }
    }

    #[test]
    fn game_status_terminal_states() {
        assert_eq!(Board::new().game_status(), GameStatus::Ongoing);

        // One king each is a dead draw.
        let drawn = Board::from_position("R:RK28:BK23").unwrap();
        assert_eq!(drawn.game_status(), GameStatus::Draw);

        // Black boxed into the corner with no move loses.
        let lost = Board::from_position("B:R36,41,37:B46").unwrap();
        assert_eq!(lost.game_status(), GameStatus::Win(Side::Red));
    }
}
