//! Legal move generation with mandatory-capture enforcement.
//!
//! Capture chains are expanded by depth-first search per piece. The strict
//! maximal-capture rule is applied afterwards: only chains whose total
//! capture count equals the global maximum survive. This is the single
//! legality authority in the crate; search, human input and externally
//! supplied moves are all validated against it.

use crate::prelude::*;

/// Fills `buffer` with every legal move for `side`. If any capture exists,
/// only captures of maximal length are returned (captures are mandatory).
/// An empty buffer means `side` has lost.
pub fn generate_moves(board: &Board, side: Side, buffer: &mut MoveBuffer) {
    buffer.clear();
    generate_captures(board, side, buffer);
    if buffer.is_empty() {
        generate_quiet_moves(board, side, buffer);
    }
}

/// In-progress capture chain. Captured pieces stay on the scratch board for
/// the duration of the chain (they still block king lines) but are flagged
/// in `captured` so no square is taken twice.
#[derive(Clone, Copy)]
struct Chain {
    origin: Square,
    piece: Piece,
    captured: u64,
    list: CaptureList,
    king_capture: bool,
}

#[inline(always)]
const fn bit(sq: Square) -> u64 {
    1u64 << sq.index()
}

fn generate_captures(board: &Board, side: Side, buffer: &mut MoveBuffer) {
    let mut best = 0usize;
    for (sq, piece) in board.pieces(side) {
        // The mover's origin is vacated for the whole chain, so circular
        // chains may land back on it. Scratch copy only, hash untouched.
        let mut scratch = *board;
        scratch.cells[sq.index()] = None;

        let chain = Chain {
            origin: sq,
            piece,
            captured: 0,
            list: CaptureList::new(),
            king_capture: false,
        };
        extend_chain(&scratch, chain, sq, None, 0, &mut best, buffer);
    }
    // Strict maximal-capture rule.
    buffer.retain(|m| m.capture_count() == best);
}

/// Tries every capture continuation from `current`. Only terminal chains
/// (no further capture possible) are recorded; an extendable prefix is not
/// a legal move. `depth` bounds the recursion defensively.
fn extend_chain(
    board: &Board,
    chain: Chain,
    current: Square,
    last_dir: Option<Direction>,
    depth: usize,
    best: &mut usize,
    buffer: &mut MoveBuffer,
) {
    let mut extended = false;
    if depth < MAX_CHAIN_CAPTURES {
        for dir in Direction::ALL {
            // No 180-degree reversal within one chain; domain rule.
            if last_dir.is_some_and(|last| last.opposite() == dir) {
                continue;
            }
            extended |= if chain.piece.king {
                try_king_jumps(board, chain, current, dir, depth, best, buffer)
            } else {
                try_man_jump(board, chain, current, dir, depth, best, buffer)
            };
        }
    }

    if !extended && !chain.list.is_empty() {
        record_chain(chain, current, best, buffer);
    }
}

/// A man jumps an adjacent enemy onto the empty square directly beyond,
/// in any of the four diagonals (backward captures are legal).
fn try_man_jump(
    board: &Board,
    chain: Chain,
    current: Square,
    dir: Direction,
    depth: usize,
    best: &mut usize,
    buffer: &mut MoveBuffer,
) -> bool {
    let Some(victim_sq) = current.step(dir) else {
        return false;
    };
    let Some(landing) = victim_sq.step(dir) else {
        return false;
    };
    let Some(victim) = board.get(victim_sq) else {
        return false;
    };
    if victim.side == chain.piece.side
        || chain.captured & bit(victim_sq) != 0
        || board.get(landing).is_some()
    {
        return false;
    }

    extend_chain(
        board,
        chain.with_capture(victim_sq, victim),
        landing,
        Some(dir),
        depth + 1,
        best,
        buffer,
    );
    true
}

/// A flying king scans along the diagonal to the first occupied square; if
/// it is an uncaptured enemy, every empty square beyond it is a distinct
/// landing, each continuing the chain separately.
fn try_king_jumps(
    board: &Board,
    chain: Chain,
    current: Square,
    dir: Direction,
    depth: usize,
    best: &mut usize,
    buffer: &mut MoveBuffer,
) -> bool {
    let mut scan = current.step(dir);
    while let Some(sq) = scan {
        match board.get(sq) {
            None => scan = sq.step(dir),
            Some(victim) => {
                // Already-captured pieces stay put and block the line.
                if victim.side == chain.piece.side || chain.captured & bit(sq) != 0 {
                    return false;
                }
                let next = chain.with_capture(sq, victim);
                let mut landed = false;
                let mut landing = sq.step(dir);
                while let Some(l) = landing {
                    if board.get(l).is_some() {
                        break;
                    }
                    extend_chain(board, next, l, Some(dir), depth + 1, best, buffer);
                    landed = true;
                    landing = l.step(dir);
                }
                return landed;
            }
        }
    }
    false
}

impl Chain {
    fn with_capture(mut self, sq: Square, victim: Piece) -> Self {
        self.captured |= bit(sq);
        self.list.push(sq);
        self.king_capture |= victim.king;
        self
    }
}

fn record_chain(chain: Chain, to: Square, best: &mut usize, buffer: &mut MoveBuffer) {
    let count = chain.list.len();
    // Shorter than an already-found chain; the maximal filter would drop it.
    if count < *best || buffer.len() == MAX_MOVES {
        return;
    }
    *best = count.max(*best);
    buffer.push(Move {
        from: chain.origin,
        to,
        captures: chain.list,
        king_capture: chain.king_capture,
    });
}

fn generate_quiet_moves(board: &Board, side: Side, buffer: &mut MoveBuffer) {
    for (sq, piece) in board.pieces(side) {
        if piece.king {
            // Flying king: slides any distance until blocked.
            for dir in Direction::ALL {
                let mut next = sq.step(dir);
                while let Some(to) = next {
                    if board.get(to).is_some() {
                        break;
                    }
                    buffer.push(Move::quiet(sq, to));
                    next = to.step(dir);
                }
            }
        } else {
            // Men move forward only when not capturing.
            for dir in Direction::forward_for(side) {
                if let Some(to) = sq.step(dir)
                    && board.get(to).is_none()
                {
                    buffer.push(Move::quiet(sq, to));
                }
            }
        }
    }
}

/// Whether the piece on `sq` could be captured by `by` if it were to move:
/// for each diagonal, an empty landing square one step past `sq` with an
/// enemy man adjacent on the far side, or an enemy king anywhere on a clear
/// line. Shared by the evaluator's threat terms and the search safety check.
pub fn is_square_attacked(board: &Board, sq: Square, by: Side) -> bool {
    for dir in Direction::ALL {
        // An attacker approaching along `dir` jumps over `sq` and lands on
        // the square just beyond it.
        let Some(landing) = sq.step(dir.opposite()) else {
            continue;
        };
        if board.get(landing).is_some() {
            continue;
        }
        let mut scan = sq.step(dir);
        let mut dist = 1usize;
        while let Some(attacker_sq) = scan {
            match board.get(attacker_sq) {
                None => {
                    scan = attacker_sq.step(dir);
                    dist += 1;
                }
                Some(p) => {
                    if p.side == by && (p.king || dist == 1) {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}

/// Finds the legal move matching a bare (from, to) pair, as supplied by
/// human input or a remote move source. Returns the engine's own resolved
/// move (with its capture chain) or `None` if no legal move matches.
pub fn resolve_move(board: &Board, from: Square, to: Square) -> Option<Move> {
    let mut moves = MoveBuffer::new();
    generate_moves(board, board.stm, &mut moves);
    moves
        .as_slice()
        .iter()
        .find(|m| m.from == from && m.to == to)
        .copied()
}

/// Membership test against the legal move set. Capture order is not
/// significant, only the captured set.
pub fn validate_external_move(board: &Board, mv: &Move) -> bool {
    let mut moves = MoveBuffer::new();
    generate_moves(board, board.stm, &mut moves);
    moves
        .as_slice()
        .iter()
        .any(|m| m.from == mv.from && m.to == mv.to && m.captures.same_set(&mv.captures))
}
