use std::sync::LazyLock;

use crate::prelude::*;
use crate::utils::prng::Prng;

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

#[derive(Debug)]
pub struct ZobristKeys {
    /// One key per (piece kind, square): red man, red king, black man, black king.
    pub pieces: [[u64; NUM_SQUARES]; NUM_PIECE_KINDS],
    /// Single key to flip when the side to move changes.
    pub black_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self {
            pieces: [[0; NUM_SQUARES]; NUM_PIECE_KINDS],
            black_to_move: 0,
        }
    }
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = Prng::init(1070373321345817214);
        let mut keys = Self {
            black_to_move: rng.rand(),
            ..Default::default()
        };

        for kind in 0..NUM_PIECE_KINDS {
            for square in 0..NUM_SQUARES {
                keys.pieces[kind][square] = rng.rand();
            }
        }

        keys
    }
}

/// Full hash of a position: one key per occupied (square, piece kind),
/// plus the stm key when Black is to move. `Board::apply_move` maintains
/// the same value incrementally.
pub fn calculate_hash(board: &Board) -> u64 {
    let mut hash = 0;

    for sq in Square::all() {
        if let Some(piece) = board.get(sq) {
            hash ^= ZOBRIST.pieces[piece.kind_index()][sq.index()];
        }
    }

    if board.stm == Side::Black {
        hash ^= ZOBRIST.black_to_move;
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let board = Board::new();
        let h1 = calculate_hash(&board);
        let h2 = calculate_hash(&board);
        assert_eq!(h1, h2);
        assert_eq!(board.hash, h1);
    }

    #[test]
    fn hash_differs_on_side_to_move() {
        let mut board = Board::new();
        let hash_red = board.hash;
        board.make_null_move();
        assert_ne!(board.hash, hash_red, "stm must change the hash");
        board.make_null_move();
        assert_eq!(board.hash, hash_red);
    }

    #[test]
    fn hash_differs_on_king_flag() {
        let sq = Square::from_number(28).unwrap();

        let mut man_board = Board::empty();
        man_board.place(sq, Piece::man(Side::Red));

        let mut king_board = Board::empty();
        king_board.place(sq, Piece::king(Side::Red));

        assert_ne!(man_board.hash, king_board.hash);
    }

    #[test]
    fn incremental_hash_matches_full_recalculation() {
        let mut board = Board::new();
        let mut moves = MoveBuffer::new();

        // Walk a few plies of the game tree along the first legal move.
        for _ in 0..12 {
            move_gen::generate_moves(&board, board.stm, &mut moves);
            let Some(&mv) = moves.first() else { break };
            board.apply_move(mv).unwrap();
            assert_eq!(
                board.hash,
                calculate_hash(&board),
                "incremental hash diverged after {mv}"
            );
        }
    }

    #[test]
    fn transpositions_hash_identically() {
        // Two quiet-move orders reaching the same position.
        fn play(sequence: &[(u8, u8)]) -> Board {
            let mut board = Board::new();
            for &(from, to) in sequence {
                let mut moves = MoveBuffer::new();
                move_gen::generate_moves(&board, board.stm, &mut moves);
                let mv = *moves
                    .as_slice()
                    .iter()
                    .find(|m| m.from.number() == from && m.to.number() == to)
                    .unwrap_or_else(|| panic!("move {from}-{to} should be legal"));
                board.apply_move(mv).unwrap();
            }
            board
        }

        let a = play(&[(16, 21), (35, 30), (18, 22), (33, 28)]);
        let b = play(&[(16, 21), (33, 28), (18, 22), (35, 30)]);
        assert_eq!(a.hash, b.hash, "same position must hash identically");
    }
}
