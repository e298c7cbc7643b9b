use crate::prelude::*;

/// Bare material count, mostly a baseline for comparing evaluators and for
/// tests that need a predictable score.
#[derive(Debug)]
pub struct MaterialEvaluator {
    name: String,
}

impl Default for MaterialEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialEvaluator {
    pub fn new() -> Self {
        Self {
            name: "Material".to_string(),
        }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let mut score = 0;
        for piece in board.cells.iter().flatten() {
            let value = if piece.king { KING_VALUE } else { MAN_VALUE };
            if piece.side == side {
                score += value;
            } else {
                score -= value;
            }
        }
        score
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let board = Board::new();
        let eval = MaterialEvaluator::new();
        assert_eq!(eval.evaluate(&board, Side::Red), 0);
        assert_eq!(eval.evaluate(&board, Side::Black), 0);
    }

    #[test]
    fn king_outweighs_men() {
        let board = Board::from_position("R:RK28:B19,24").unwrap();
        let eval = MaterialEvaluator::new();
        let score = eval.evaluate(&board, Side::Red);
        assert_eq!(score, KING_VALUE - 2 * MAN_VALUE);
        assert_eq!(eval.evaluate(&board, Side::Black), -score);
    }
}
