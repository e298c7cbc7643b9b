pub mod board;
pub mod engine;
pub mod evaluation;
pub mod moves;
pub mod prelude;
pub mod search;
pub mod utils;

pub mod consts {
    /// Playable (dark) squares on the 10x10 board.
    pub const NUM_SQUARES: usize = 50;
    pub const NUM_ROWS: usize = 10;
    pub const NUM_COLS: usize = 10;
    /// Man and king for each of the two sides.
    pub const NUM_PIECE_KINDS: usize = 4;
    pub const NUM_SIDES: usize = 2;

    pub const MAX_PLY: usize = 64;
    /// Upper bound on legal moves in any reachable position.
    pub const MAX_MOVES: usize = 256;
    /// Upper bound on pieces taken in one capture chain.
    pub const MAX_CHAIN_CAPTURES: usize = 20;

    pub const WIN_SCORE: i32 = 100_000;
    /// Scores beyond this are win/loss distances, not evaluations.
    pub const WIN_THRESHOLD: i32 = WIN_SCORE - MAX_PLY as i32;

    pub const MAN_VALUE: i32 = 100;
    pub const KING_VALUE: i32 = 330;

    pub const DEFAULT_DEPTH: u8 = 8;
    pub const DEFAULT_TIME_MS: u64 = 3_000;

    /// Null-move pruning is skipped below this many total pieces.
    pub const NMP_PIECE_THRESHOLD: usize = 8;
    pub const NMP_MIN_DEPTH: u8 = 3;

    pub const LMR_MIN_DEPTH: u8 = 3;
    /// Moves before this index in the ordering are never reduced.
    pub const LMR_MIN_MOVE: usize = 3;

    pub const START_POSITION: &str = "R:R1-20:B31-50";
}
