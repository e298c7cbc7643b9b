use std::time::Instant;

use crate::prelude::*;
use crate::search::move_ordering::HistoryTable;
use crate::search::move_picker::MovePicker;
use crate::search::tt::{Bound, TranspositionEntry, TranspositionTable};
use crate::search::{
    MoveStrategy, SearchConfig, SearchContext, SearchLimits, SearchResult, SearchStats,
    adjust_score_for_ply, adjust_score_from_ply,
};

/// Killer moves and history scores, reset between top-level searches.
#[derive(Debug)]
pub struct SearchTables {
    pub killer_moves: [[Option<Move>; 2]; MAX_PLY],
    pub history: Box<HistoryTable>,
}

impl Default for SearchTables {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTables {
    pub fn new() -> Self {
        Self {
            killer_moves: [[None; 2]; MAX_PLY],
            history: Box::new([[0; NUM_SQUARES]; NUM_SQUARES]),
        }
    }

    pub fn clear(&mut self) {
        self.killer_moves = [[None; 2]; MAX_PLY];
        for row in self.history.iter_mut() {
            row.fill(0);
        }
    }

    fn update_killers(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY || self.killer_moves[ply][0] == Some(mv) {
            return;
        }
        self.killer_moves[ply][1] = self.killer_moves[ply][0];
        self.killer_moves[ply][0] = Some(mv);
    }

    fn update_history(&mut self, mv: Move, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let slot = &mut self.history[mv.from.index()][mv.to.index()];
        *slot = (*slot + bonus).min(HISTORY_MAX);
        if *slot >= HISTORY_MAX {
            self.decay_history();
        }
    }

    fn decay_history(&mut self) {
        for row in self.history.iter_mut() {
            for score in row.iter_mut() {
                *score /= 2;
            }
        }
    }
}

const HISTORY_MAX: i32 = 1 << 20;

/// Iterative-deepening negamax with alpha-beta pruning. Holds its own
/// transposition table, killer/history tables, and evaluator.
#[derive(Debug)]
pub struct AlphaBetaSearch {
    pub config: SearchConfig,
    pub limits: SearchLimits,
    pub evaluator: Box<dyn Evaluator>,
    pub stats: SearchStats,
    tables: SearchTables,
    tt: TranspositionTable,
    nodes_searched: u64,
    in_progress: bool,
    start_time: Instant,
}

impl Default for AlphaBetaSearch {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl AlphaBetaSearch {
    pub fn new(depth: u8) -> Self {
        Self::with_evaluator(depth, Box::new(HeuristicEvaluator::new()))
    }

    pub fn with_evaluator(depth: u8, evaluator: Box<dyn Evaluator>) -> Self {
        let config = SearchConfig::default();
        Self {
            config,
            limits: SearchLimits::depth(depth),
            evaluator,
            stats: SearchStats::new(),
            tables: SearchTables::new(),
            tt: TranspositionTable::new(config.hash_size_mb),
            nodes_searched: 0,
            in_progress: false,
            start_time: Instant::now(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        if config.hash_size_mb != self.config.hash_size_mb {
            self.tt = TranspositionTable::new(config.hash_size_mb);
        }
        self.config = config;
        self
    }

    fn search(&mut self, board: &Board) -> SearchResult {
        self.start_time = Instant::now();
        self.nodes_searched = 0;
        self.in_progress = true;
        self.stats = SearchStats::new();
        self.tables.clear();
        self.tt.clear();

        let max_depth = self.limits.max_depth.unwrap_or(MAX_PLY as u8);

        let mut root_moves = MoveBuffer::new();
        move_gen::generate_moves(board, board.stm, &mut root_moves);

        if root_moves.is_empty() {
            // No legal moves: the side to move has lost.
            return SearchResult {
                best_move: None,
                score: -WIN_SCORE,
                depth: 0,
                nodes_searched: 0,
                time_taken: self.start_time.elapsed(),
            };
        }
        if root_moves.len() == 1 {
            let only = *root_moves.first().unwrap();
            debug!(mv = %only, "single legal move, skipping search");
            return SearchResult {
                best_move: Some(only),
                score: 0,
                depth: 0,
                nodes_searched: 1,
                time_taken: self.start_time.elapsed(),
            };
        }

        let mut best_move: Option<Move> = None;
        let mut best_score = -WIN_SCORE;
        let mut completed_depth = 0u8;

        for depth in 1..=max_depth {
            self.order_root_moves(&mut root_moves, best_move);

            let mut iteration_best: Option<Move> = None;
            let mut iteration_score = -WIN_SCORE;
            let mut alpha = -WIN_SCORE;
            let beta = WIN_SCORE;
            let mut aborted = false;

            for &mv in &root_moves {
                let mut child = *board;
                if child.apply_move(mv).is_err() {
                    continue;
                }
                let ctx = SearchContext::root().new_child(iteration_best.is_none());
                let score = -self.alpha_beta(&child, depth - 1, -beta, -alpha, ctx);

                if self.should_stop() {
                    aborted = true;
                    break;
                }
                if score > iteration_score || iteration_best.is_none() {
                    iteration_score = score;
                    iteration_best = Some(mv);
                }
                alpha = alpha.max(score);
            }

            if aborted {
                // Partial iterations are discarded; the previous depth's
                // best move stands.
                break;
            }

            best_move = iteration_best;
            best_score = iteration_score;
            completed_depth = depth;

            if self.config.emit_info
                && let Some(mv) = best_move
            {
                info!(depth, score = best_score, nodes = self.nodes_searched, mv = %mv, "iteration complete");
            }

            if best_score.abs() > WIN_THRESHOLD {
                break;
            }
        }

        self.in_progress = false;

        if best_move.is_none() {
            // Even depth 1 was cut short; fall back to the first legal move.
            best_move = root_moves.first().copied();
        }

        if self.config.enable_safety_check
            && let Some(mv) = best_move
            && !mv.is_capture()
        {
            best_move = Some(self.safety_check(board, mv, &root_moves));
        }

        let time_taken = self.start_time.elapsed();
        if self.config.collect_stats {
            self.stats.nodes_searched = self.nodes_searched;
            self.stats.depth_reached = completed_depth;
            self.stats.time_elapsed = time_taken;
            self.stats.calculate_nps();
            self.stats.log_summary();
        }

        SearchResult {
            best_move,
            score: best_score,
            depth: completed_depth,
            nodes_searched: self.nodes_searched,
            time_taken,
        }
    }

    /// Root ordering: previous iteration's best move first, then captures
    /// by length, then history.
    fn order_root_moves(&self, moves: &mut MoveBuffer, prev_best: Option<Move>) {
        let history = &self.tables.history;
        moves.sort_by_key(|mv| {
            if prev_best == Some(*mv) {
                i32::MIN
            } else if mv.is_capture() {
                -1_000_000 - 1_000 * mv.capture_count() as i32
            } else {
                -history[mv.from.index()][mv.to.index()]
            }
        });
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ctx: SearchContext,
    ) -> i32 {
        self.nodes_searched += 1;
        if self.config.collect_stats {
            self.stats.main_search_nodes += 1;
        }
        if self.nodes_searched.trailing_zeros() >= 10 && self.should_stop() {
            return 0;
        }

        if ctx.ply >= MAX_PLY {
            return self.evaluator.evaluate(board, board.stm);
        }

        if board.is_material_draw() {
            if self.config.collect_stats {
                self.stats.draw_returns += 1;
            }
            return 0;
        }

        let mut tt_move: Option<Move> = None;
        if self.config.collect_stats {
            self.stats.tt_probes += 1;
        }
        if let Some(entry) = self.tt.probe(board.hash) {
            if self.config.collect_stats {
                self.stats.tt_hits += 1;
            }
            tt_move = Some(entry.best_move);
            if entry.depth >= depth && !ctx.is_pv_node {
                let score = adjust_score_for_ply(entry.score, ctx.ply);
                let cutoff = match entry.bound {
                    Bound::Exact => true,
                    Bound::Lower => score >= beta,
                    Bound::Upper => score <= alpha,
                };
                if cutoff {
                    if self.config.collect_stats {
                        self.stats.tt_cutoffs += 1;
                    }
                    return score;
                }
            }
        }

        let mut moves = MoveBuffer::new();
        move_gen::generate_moves(board, board.stm, &mut moves);

        if moves.is_empty() {
            if self.config.collect_stats {
                self.stats.loss_returns += 1;
            }
            return -WIN_SCORE + ctx.ply as i32;
        }

        let captures_available = moves.first().is_some_and(Move::is_capture);

        // Null-move pruning. Skipping a turn is unsound when captures are
        // on (they are mandatory) or with too little material (zugzwang-like
        // endings are common in draughts).
        if self.config.enable_nmp
            && !ctx.is_pv_node
            && depth >= NMP_MIN_DEPTH
            && !captures_available
            && board.piece_count() >= NMP_PIECE_THRESHOLD
            && beta < WIN_THRESHOLD
        {
            if self.config.collect_stats {
                self.stats.null_move_attempts += 1;
            }
            let mut null_board = *board;
            null_board.make_null_move();
            let reduction = 2u8;
            let null_depth = depth.saturating_sub(1 + reduction);
            let null_ctx = ctx.new_child(false);
            let score = -self.alpha_beta(&null_board, null_depth, -beta, -beta + 1, null_ctx);
            if score >= beta {
                if self.config.collect_stats {
                    self.stats.null_move_cutoffs += 1;
                }
                return beta;
            }
        }

        if depth == 0 {
            return self.quiescence(board, alpha, beta, ctx);
        }

        let killers = if ctx.ply < MAX_PLY {
            self.tables.killer_moves[ctx.ply]
        } else {
            [None; 2]
        };
        let mut picker =
            MovePicker::new(moves.as_mut_slice(), &killers, tt_move, &self.tables.history);

        let mut best_score = -WIN_SCORE;
        let mut best_move: Option<Move> = None;
        let mut bound = Bound::Upper;
        let mut move_index = 0usize;

        while let Some(mv) = picker.next_best() {
            let mut child = *board;
            if child.apply_move(mv).is_err() {
                continue;
            }

            let is_pv_child = ctx.is_pv_node && move_index == 0;
            let child_ctx = ctx.new_child(is_pv_child);

            let score = if self.config.enable_lmr
                && move_index >= LMR_MIN_MOVE
                && depth >= LMR_MIN_DEPTH
                && !mv.is_capture()
                && !ctx.is_pv_node
            {
                if self.config.collect_stats {
                    self.stats.lmr_attempts += 1;
                }
                let reduced =
                    -self.alpha_beta(&child, depth - 2, -alpha - 1, -alpha, child_ctx);
                if reduced > alpha {
                    if self.config.collect_stats {
                        self.stats.lmr_research += 1;
                    }
                    -self.alpha_beta(&child, depth - 1, -beta, -alpha, child_ctx)
                } else {
                    reduced
                }
            } else {
                -self.alpha_beta(&child, depth - 1, -beta, -alpha, child_ctx)
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }

            if score >= beta {
                if self.config.collect_stats {
                    self.stats.beta_cutoffs_main += 1;
                    let bucket = move_index.min(self.stats.cutoff_at_move.len() - 1);
                    self.stats.cutoff_at_move[bucket] += 1;
                }
                if !mv.is_capture() {
                    self.tables.update_killers(ctx.ply, mv);
                    self.tables.update_history(mv, depth);
                }
                bound = Bound::Lower;
                break;
            }
            if score > alpha {
                alpha = score;
                bound = Bound::Exact;
            }

            move_index += 1;
        }

        if let Some(mv) = best_move {
            self.tt.store(TranspositionEntry {
                hash: board.hash,
                depth,
                score: adjust_score_from_ply(best_score, ctx.ply),
                bound,
                best_move: mv,
            });
        }

        best_score
    }

    /// Capture-resolution search. Captures are mandatory, so when any
    /// exist there is no stand-pat option; a quiet position simply
    /// returns the static evaluation.
    fn quiescence(&mut self, board: &Board, mut alpha: i32, beta: i32, ctx: SearchContext) -> i32 {
        self.nodes_searched += 1;
        if self.config.collect_stats {
            self.stats.qsearch_nodes += 1;
        }

        if board.is_material_draw() {
            return 0;
        }
        if ctx.ply >= MAX_PLY {
            return self.evaluator.evaluate(board, board.stm);
        }

        let mut moves = MoveBuffer::new();
        move_gen::generate_moves(board, board.stm, &mut moves);

        if moves.is_empty() {
            return -WIN_SCORE + ctx.ply as i32;
        }
        if !moves.first().is_some_and(Move::is_capture) {
            return self.evaluator.evaluate(board, board.stm);
        }

        let mut best_score = -WIN_SCORE;
        let mut picker = MovePicker::new_qsearch(moves.as_mut_slice());
        while let Some(mv) = picker.next_best() {
            let mut child = *board;
            if child.apply_move(mv).is_err() {
                continue;
            }
            let score = -self.quiescence(&child, -beta, -alpha, ctx.new_child(false));
            best_score = best_score.max(score);
            if score >= beta {
                if self.config.collect_stats {
                    self.stats.beta_cutoffs_qs += 1;
                }
                return score;
            }
            alpha = alpha.max(score);
        }

        best_score
    }

    /// Material a reply capture would take off the board, from the
    /// perspective of the side that just moved.
    fn reply_material_loss(&self, board: &Board) -> i32 {
        let mut replies = MoveBuffer::new();
        move_gen::generate_moves(board, board.stm, &mut replies);
        replies
            .as_slice()
            .iter()
            .map(|mv| self.capture_material(board, mv))
            .max()
            .unwrap_or(0)
    }

    fn capture_material(&self, board: &Board, mv: &Move) -> i32 {
        mv.captures
            .iter()
            .filter_map(|sq| board.get(sq))
            .map(|piece| if piece.king { KING_VALUE } else { MAN_VALUE })
            .sum()
    }

    /// Horizon guard for the chosen quiet move: if the opponent's best
    /// reply immediately wins material, prefer a quiet alternative whose
    /// reply loses nothing, ranked by static eval.
    fn safety_check(&mut self, board: &Board, chosen: Move, root_moves: &MoveBuffer) -> Move {
        let mut after = *board;
        if after.apply_move(chosen).is_err() {
            return chosen;
        }
        let loss = self.reply_material_loss(&after);
        if loss <= 0 {
            return chosen;
        }

        let mut best_alternative: Option<(Move, i32)> = None;
        for &mv in root_moves {
            if mv == chosen {
                continue;
            }
            let mut child = *board;
            if child.apply_move(mv).is_err() {
                continue;
            }
            if self.reply_material_loss(&child) > 0 {
                continue;
            }
            let eval = -self.evaluator.evaluate(&child, child.stm);
            if best_alternative.is_none_or(|(_, s)| eval > s) {
                best_alternative = Some((mv, eval));
            }
        }

        match best_alternative {
            Some((mv, _)) => {
                if self.config.collect_stats {
                    self.stats.safety_overrides += 1;
                }
                debug!(chosen = %chosen, replacement = %mv, loss, "safety check replaced hanging move");
                mv
            }
            None => chosen,
        }
    }

    fn should_stop(&self) -> bool {
        if !self.in_progress {
            return true;
        }
        if let Some(max_time) = self.limits.max_time
            && self.start_time.elapsed() >= max_time
        {
            return true;
        }
        if let Some(max_nodes) = self.limits.max_nodes
            && self.nodes_searched >= max_nodes
        {
            return true;
        }
        false
    }
}

impl MoveStrategy for AlphaBetaSearch {
    fn find_best_move(&mut self, board: &Board) -> SearchResult {
        self.search(board)
    }

    fn set_depth(&mut self, depth: u8) {
        self.limits = SearchLimits::depth(depth);
    }

    fn set_time(&mut self, time_ms: u64) {
        self.limits = SearchLimits::time(time_ms);
    }

    fn clear(&mut self) {
        self.tables.clear();
        self.tt.clear();
        self.stats = SearchStats::new();
    }

    fn name(&self) -> &str {
        "alpha-beta"
    }
}
