use std::time::Duration;

use crate::prelude::*;

pub mod alpha_beta;
pub mod move_ordering;
pub mod move_picker;
pub mod tt;

pub use alpha_beta::AlphaBetaSearch;

/// Capability interface for a move-selection strategy. `AlphaBetaSearch`
/// is the only implementation here; an alternative (for example MCTS)
/// would plug in behind the same trait.
pub trait MoveStrategy {
    fn find_best_move(&mut self, board: &Board) -> SearchResult;
    fn set_depth(&mut self, depth: u8);
    fn set_time(&mut self, time_ms: u64);
    fn clear(&mut self);
    fn name(&self) -> &str;
}

/// Result of a search
#[derive(Debug, Default, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes_searched: u64,
    pub time_taken: Duration,
}

impl SearchResult {
    pub fn nps(&self) -> u64 {
        let time_ms = self.time_taken.as_millis().max(1) as u64;
        (self.nodes_searched * 1000) / time_ms
    }
}

/// Search limits (time, depth, nodes)
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub max_depth: Option<u8>,
    pub max_time: Option<Duration>,
    pub max_nodes: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_DEPTH),
            max_time: Some(Duration::from_millis(DEFAULT_TIME_MS)),
            max_nodes: None,
        }
    }
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            max_depth: Some(depth),
            max_time: None,
            max_nodes: None,
        }
    }

    pub fn time(time_ms: u64) -> Self {
        Self {
            max_depth: None,
            max_time: Some(Duration::from_millis(time_ms)),
            max_nodes: None,
        }
    }

    pub fn nodes(nodes: u64) -> Self {
        Self {
            max_depth: None,
            max_time: None,
            max_nodes: Some(nodes),
        }
    }
}

/// Configuration for search behavior
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub enable_nmp: bool,
    pub enable_lmr: bool,
    pub enable_safety_check: bool,
    pub emit_info: bool,
    pub collect_stats: bool,
    pub hash_size_mb: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable_nmp: true,
            enable_lmr: true,
            enable_safety_check: true,
            emit_info: false,
            collect_stats: true,
            hash_size_mb: 16,
        }
    }
}

/// Holds current ply and pv-node flag for one recursion frame.
#[derive(Clone, Copy)]
pub struct SearchContext {
    pub ply: usize,
    pub is_pv_node: bool,
}

impl SearchContext {
    pub fn root() -> Self {
        Self {
            ply: 0,
            is_pv_node: true,
        }
    }

    pub fn new_child(&self, is_pv_child: bool) -> Self {
        SearchContext {
            ply: self.ply + 1,
            is_pv_node: is_pv_child,
        }
    }
}

/// Per-search statistics, reset on every `find_best_move` call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    pub nodes_searched: u64,
    pub depth_reached: u8,
    pub time_elapsed: Duration,
    pub nps: u64,

    pub main_search_nodes: u64,
    pub qsearch_nodes: u64,

    pub tt_probes: u64,
    pub tt_hits: u64,
    pub tt_cutoffs: u64,

    pub null_move_attempts: u64,
    pub null_move_cutoffs: u64,
    pub lmr_attempts: u64,
    pub lmr_research: u64,

    pub beta_cutoffs_main: u64,
    pub beta_cutoffs_qs: u64,
    pub draw_returns: u64,
    pub loss_returns: u64,
    pub safety_overrides: u64,

    pub cutoff_at_move: [u64; 8],
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn percent(numerator: u64, denominator: u64) -> f64 {
        if denominator == 0 {
            0.0
        } else {
            100.0 * numerator as f64 / denominator as f64
        }
    }

    pub fn calculate_nps(&mut self) {
        let time_ms = self.time_elapsed.as_millis().max(1) as u64;
        self.nps = (self.nodes_searched * 1000) / time_ms;
    }

    pub fn log_summary(&self) {
        debug!("=> SEARCH STATISTICS (depth {})", self.depth_reached);
        debug!(
            "NODES total={} main={} qsearch={} time={:?} nps={}",
            self.nodes_searched,
            self.main_search_nodes,
            self.qsearch_nodes,
            self.time_elapsed,
            self.nps
        );
        debug!(
            "TT hits {}/{} ({:.2}%), cutoffs {}",
            self.tt_hits,
            self.tt_probes,
            Self::percent(self.tt_hits, self.tt_probes),
            self.tt_cutoffs
        );
        debug!(
            "NMP {}/{} ({:.2}%), LMR research {}/{} ({:.2}%)",
            self.null_move_cutoffs,
            self.null_move_attempts,
            Self::percent(self.null_move_cutoffs, self.null_move_attempts),
            self.lmr_research,
            self.lmr_attempts,
            Self::percent(self.lmr_research, self.lmr_attempts),
        );
        debug!(
            "beta cutoffs main={} qs={} draws={} losses={} safety overrides={}",
            self.beta_cutoffs_main,
            self.beta_cutoffs_qs,
            self.draw_returns,
            self.loss_returns,
            self.safety_overrides
        );

        let total_cutoffs: u64 = self.cutoff_at_move.iter().sum();
        if total_cutoffs > 0 {
            let histogram: Vec<String> = self
                .cutoff_at_move
                .iter()
                .enumerate()
                .filter(|&(_, &count)| count > 0)
                .map(|(i, count)| format!("{i}:{count}"))
                .collect();
            debug!("cutoff histogram (move index:count): [{}]", histogram.join(", "));
        }
    }
}

/// Adjusts a stored score so win/loss distances stay relative to the
/// current node. Applied when reading from the transposition table.
#[inline(always)]
pub fn adjust_score_for_ply(score: i32, ply: usize) -> i32 {
    if score.abs() > WIN_THRESHOLD {
        if score > 0 {
            score.saturating_sub(ply as i32)
        } else {
            score.saturating_add(ply as i32)
        }
    } else {
        score
    }
}

/// Inverse of [`adjust_score_for_ply`]; applied before storing an entry.
#[inline(always)]
pub fn adjust_score_from_ply(score: i32, ply: usize) -> i32 {
    if score.abs() > WIN_THRESHOLD {
        if score > 0 {
            score.saturating_add(ply as i32)
        } else {
            score.saturating_sub(ply as i32)
        }
    } else {
        score
    }
}
