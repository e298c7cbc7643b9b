pub use crate::board::fen;
pub use crate::board::{
    self, Board, GameStatus,
    components::{Direction, Piece, Side, Square},
    zobrist::{self, ZOBRIST},
};
pub use crate::consts::*;
pub use crate::engine::{self, TurnState};
pub use crate::evaluation::{
    self, Evaluator, heuristic::HeuristicEvaluator, material::MaterialEvaluator,
    weights::EvalWeights,
};
pub use crate::moves::{self, CaptureList, Move, MoveBuffer, parse_move_spec};
pub use crate::search::{self, AlphaBetaSearch, MoveStrategy, SearchLimits, SearchResult};
pub use crate::utils::{self, cli::*, log::*, prng::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use moves::move_gen;
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
