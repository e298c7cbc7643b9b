use crate::consts::NUM_SQUARES;
use crate::moves::Move;

const TT_MOVE_SCORE: i32 = 3_000_000;
const CAPTURE_OFFSET: i32 = 2_000_000;
const KILLER_MOVE_SCORE: i32 = 1_000_000;
const KING_VICTIM_BONUS: i32 = 500;

pub type HistoryTable = [[i32; NUM_SQUARES]; NUM_SQUARES];

/// Ordering score for one move: transposition-table move first, then
/// captures by chain length (king victims break ties), then killer moves,
/// then the history score.
pub fn score_move(
    mv: Move,
    killers: &[Option<Move>; 2],
    tt_move: Option<Move>,
    history: &HistoryTable,
) -> i32 {
    if tt_move == Some(mv) {
        TT_MOVE_SCORE
    } else if mv.is_capture() {
        CAPTURE_OFFSET
            + 1_000 * mv.capture_count() as i32
            + if mv.king_capture { KING_VICTIM_BONUS } else { 0 }
    } else if killers.contains(&Some(mv)) {
        KILLER_MOVE_SCORE
    } else {
        history[mv.from.index()][mv.to.index()]
    }
}
