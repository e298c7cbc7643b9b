use crate::prelude::*;

pub mod heuristic;
pub mod material;
pub mod weights;

pub use heuristic::HeuristicEvaluator;
pub use material::MaterialEvaluator;
pub use weights::EvalWeights;

/// Static position scoring, side-relative: positive favours `side`.
///
/// Implementations must be symmetric: `evaluate(b, Red) == -evaluate(b, Black)`.
pub trait Evaluator: std::fmt::Debug + Send {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
    fn name(&self) -> &str;
}
