use crate::prelude::*;

/// The main weighted evaluator: material, capture threats, promotion
/// proximity, formation cohesion and a light mobility term, all scaled by
/// an externally supplied [`EvalWeights`].
///
/// Scores each side with the same per-piece terms and returns the
/// difference, so `evaluate(b, Red) == -evaluate(b, Black)` holds by
/// construction.
#[derive(Debug)]
pub struct HeuristicEvaluator {
    name: String,
    weights: EvalWeights,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicEvaluator {
    pub fn new() -> Self {
        Self::with_weights(EvalWeights::default())
    }

    pub fn with_weights(weights: EvalWeights) -> Self {
        Self {
            name: "Heuristic".to_string(),
            weights,
        }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut EvalWeights {
        &mut self.weights
    }

    fn score_side(&self, board: &Board, side: Side) -> i32 {
        let w = &self.weights;
        let mut score = 0;

        for (sq, piece) in board.pieces(side) {
            score += if piece.king { w.king_value } else { w.man_value };

            if !piece.king {
                let advancement = match side {
                    Side::Red => sq.row(),
                    Side::Black => (NUM_ROWS as u8 - 1) - sq.row(),
                } as i32;
                score += w.advance_bonus * advancement;
                // Men sit on rows 0..=8 from their own perspective; 7 and 8
                // are one or two steps from the crowning row.
                if advancement >= 7 {
                    score += w.promotion_zone_bonus;
                }
            }

            let neighbours = Direction::ALL
                .iter()
                .filter_map(|&dir| sq.step(dir))
                .filter_map(|n| board.get(n))
                .filter(|p| p.side == side)
                .count() as i32;
            if neighbours > 0 {
                score += w.cohesion_bonus * neighbours;
            } else {
                score -= w.isolation_penalty;
            }

            if move_gen::is_square_attacked(board, sq, side.flip()) {
                score -= if piece.king {
                    w.king_threat_penalty
                } else {
                    w.threat_penalty
                };
            }

            score += w.mobility_weight * quiet_mobility(board, sq, piece);
        }

        score
    }
}

/// Number of quiet moves available to the piece on `sq`: empty forward
/// steps for men, empty ray squares for kings.
fn quiet_mobility(board: &Board, sq: Square, piece: Piece) -> i32 {
    let mut count = 0;
    if piece.king {
        for dir in Direction::ALL {
            let mut next = sq.step(dir);
            while let Some(to) = next {
                if board.get(to).is_some() {
                    break;
                }
                count += 1;
                next = to.step(dir);
            }
        }
    } else {
        for dir in Direction::forward_for(piece.side) {
            if let Some(to) = sq.step(dir)
                && board.get(to).is_none()
            {
                count += 1;
            }
        }
    }
    count
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let red = self.score_side(board, Side::Red);
        let black = self.score_side(board, Side::Black);
        match side {
            Side::Red => red - black,
            Side::Black => black - red,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(board: &Board) {
        let eval = HeuristicEvaluator::new();
        assert_eq!(
            eval.evaluate(board, Side::Red),
            -eval.evaluate(board, Side::Black),
            "evaluation must be side-symmetric for {}",
            board.to_position()
        );
    }

    #[test]
    fn symmetric_on_assorted_positions() {
        assert_symmetric(&Board::new());
        assert_symmetric(&Board::from_position("R:RK28:B19,24").unwrap());
        assert_symmetric(&Board::from_position("B:R17,21,26,K3:B32,38,K45").unwrap());
        assert_symmetric(&Board::empty());
    }

    #[test]
    fn start_position_is_balanced() {
        let eval = HeuristicEvaluator::new();
        assert_eq!(eval.evaluate(&Board::new(), Side::Red), 0);
    }

    #[test]
    fn threatened_piece_scores_worse() {
        // Red king on 6 sees the black man on 28 along a clear diagonal with
        // an empty landing square behind it; on 40 the man is off that line.
        let threatened = Board::from_position("B:RK6:B28").unwrap();
        let quiet = Board::from_position("B:RK6:B40").unwrap();
        let eval = HeuristicEvaluator::new();
        assert!(
            eval.evaluate(&threatened, Side::Black) < eval.evaluate(&quiet, Side::Black),
            "a piece en prise must hurt the score"
        );
    }

    #[test]
    fn advanced_man_scores_better() {
        let advanced = Board::from_position("R:R39:B5").unwrap();
        let home = Board::from_position("R:R17:B5").unwrap();
        let eval = HeuristicEvaluator::new();
        assert!(eval.evaluate(&advanced, Side::Red) > eval.evaluate(&home, Side::Red));
    }

    #[test]
    fn weight_changes_shift_the_score() {
        let board = Board::from_position("R:RK28:B19").unwrap();
        let base = HeuristicEvaluator::new();
        let mut boosted_weights = EvalWeights::default();
        boosted_weights.set("king_value", 600).unwrap();
        let boosted = HeuristicEvaluator::with_weights(boosted_weights);
        assert!(boosted.evaluate(&board, Side::Red) > base.evaluate(&board, Side::Red));
    }
}
