//! Solver benchmarks.
//!
//! Covers the hot paths: cloning and moving on the board, replaying a
//! genome, and short end-to-end runs of both searches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kurtan_solver::core::{Direction, GameState, SearchRng};
use kurtan_solver::eval::{AnnealingEvaluator, Evaluator, GeneticEvaluator};
use kurtan_solver::search::{
    random_genome, AnnealingConfig, AnnealingSearch, GeneticConfig, GeneticSearch,
};

fn bench_state_clone_and_move(c: &mut Criterion) {
    let state = GameState::initial();

    c.bench_function("state_clone_and_move", |b| {
        b.iter(|| {
            let mut next = state.clone();
            black_box(next.apply_move(Direction::Up).is_ok())
        })
    });
}

fn bench_evaluate_state(c: &mut Criterion) {
    let state = GameState::initial();

    c.bench_function("evaluate_state_annealing", |b| {
        b.iter(|| black_box(AnnealingEvaluator.evaluate(&state)))
    });
}

fn bench_evaluate_genome(c: &mut Criterion) {
    let evaluator = GeneticEvaluator::new();
    let mut rng = SearchRng::new(42);
    let genome = random_genome(&mut rng, 10);

    c.bench_function("evaluate_genome_10", |b| {
        b.iter(|| black_box(evaluator.evaluate_genome(&genome)))
    });
}

fn bench_genetic_run(c: &mut Criterion) {
    let config = GeneticConfig::default()
        .with_generations(20)
        .with_parallel(false);

    c.bench_function("genetic_20_generations", |b| {
        b.iter(|| black_box(GeneticSearch::new(config.clone()).run()))
    });
}

fn bench_annealing_run(c: &mut Criterion) {
    let config = AnnealingConfig::default().with_cooling_rate(0.5);

    c.bench_function("annealing_fast_cooling", |b| {
        b.iter(|| black_box(AnnealingSearch::new(config.clone()).run()))
    });
}

criterion_group!(
    benches,
    bench_state_clone_and_move,
    bench_evaluate_state,
    bench_evaluate_genome,
    bench_genetic_run,
    bench_annealing_run,
);
criterion_main!(benches);
