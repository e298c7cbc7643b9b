use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use dammen::prelude::*;

// Middlegame position with captures in the air for both sides.
const MIDGAME: &str = "R:R17,22,28,29,33,34,38,40,44:B8,12,13,19,23,24,27,31,36";

fn bench_move_generation(c: &mut Criterion) {
    let start = Board::new();
    let midgame = Board::from_position(MIDGAME).unwrap();
    let mut buffer = MoveBuffer::new();

    c.bench_function("movegen_start_position", |b| {
        b.iter(|| {
            move_gen::generate_moves(black_box(&start), black_box(start.stm), &mut buffer);
            black_box(&buffer);
        })
    });

    c.bench_function("movegen_midgame", |b| {
        b.iter(|| {
            move_gen::generate_moves(black_box(&midgame), black_box(midgame.stm), &mut buffer);
            black_box(&buffer);
        })
    });
}

fn bench_evaluation(c: &mut Criterion) {
    let board = Board::from_position(MIDGAME).unwrap();
    let evaluator = HeuristicEvaluator::new();

    c.bench_function("evaluate_midgame", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(&board), black_box(board.stm))))
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let board = Board::new();
    let mut moves = MoveBuffer::new();
    move_gen::generate_moves(&board, board.stm, &mut moves);
    let mv = *moves.first().unwrap();

    c.bench_function("apply_move_copy", |b| {
        b.iter(|| {
            let mut child = black_box(board);
            child.apply_move(black_box(mv)).unwrap();
            black_box(&child);
        })
    });
}

fn bench_fixed_depth_search(c: &mut Criterion) {
    let board = Board::from_position(MIDGAME).unwrap();

    c.bench_function("search_depth_5", |b| {
        b.iter(|| {
            let mut search = AlphaBetaSearch::new(5);
            search.config.collect_stats = false;
            black_box(search.find_best_move(black_box(&board)))
        })
    });
}

criterion_group!(
    benches,
    bench_move_generation,
    bench_evaluation,
    bench_apply_move,
    bench_fixed_depth_search
);
criterion_main!(benches);
