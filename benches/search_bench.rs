//! Benchmarks for the solvers and the estimator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use game_search::estimator::{EstimatorConfig, MonteCarloEstimator};
use game_search::games::tic_tac_toe::TicTacToe;
use game_search::{AlphaBetaSolver, ExactSolver, Game, SearchConfig};

fn tic_tac_toe_exact_benchmark(c: &mut Criterion) {
    let game = TicTacToe::new();
    let state = game.initial_state();

    c.bench_function("tic_tac_toe_exact", |b| {
        b.iter(|| {
            let mut solver = ExactSolver::new(game.clone(), SearchConfig::deterministic());
            black_box(solver.solve(black_box(&state)))
        })
    });
}

fn tic_tac_toe_pruned_benchmark(c: &mut Criterion) {
    let game = TicTacToe::new();
    let state = game.initial_state();

    c.bench_function("tic_tac_toe_pruned", |b| {
        b.iter(|| {
            let mut solver = AlphaBetaSolver::new(game.clone(), SearchConfig::seeded(42));
            black_box(solver.solve(black_box(&state)))
        })
    });
}

fn monte_carlo_benchmark(c: &mut Criterion) {
    let config = EstimatorConfig::new(10, 2, 2.2)
        .with_samples(100_000)
        .with_seed(42);
    let estimator = MonteCarloEstimator::new(config).unwrap();

    c.bench_function("monte_carlo_100k_deals", |b| {
        b.iter(|| black_box(estimator.estimate_first_party()))
    });
}

criterion_group!(
    benches,
    tic_tac_toe_exact_benchmark,
    tic_tac_toe_pruned_benchmark,
    monte_carlo_benchmark
);
criterion_main!(benches);
