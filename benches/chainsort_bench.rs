//! Criterion benchmarks for u-chainsort solvers.
//!
//! Uses generated instances (shuffled random chains and independent random
//! items) to measure search cost as the item count grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_chainsort::generate::{random_chain, random_items, shuffled};
use u_chainsort::metric::{Euclidean, Manhattan};
use u_chainsort::{BnbConfig, BranchAndBound, ExhaustiveConfig, ExhaustiveSolver};

// ===========================================================================
// Exhaustive enumeration
// ===========================================================================

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_random_items");
    group.sample_size(10);

    for &n in &[5, 7, 8] {
        let mut rng = StdRng::seed_from_u64(42);
        let items = random_items(n, &mut rng);
        let solver = ExhaustiveSolver::new(ExhaustiveConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| {
                let result = solver.solve(black_box(items), &Manhattan);
                black_box(result)
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Branch-and-bound
// ===========================================================================

fn bench_bnb_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_shuffled_chain");

    for &n in &[10, 20, 40] {
        let mut rng = StdRng::seed_from_u64(42);
        let chain = random_chain(n, &mut rng);
        let items = shuffled(&chain, &mut rng);
        let solver = BranchAndBound::new(BnbConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| {
                let result = solver.solve(black_box(items), &Euclidean);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_bnb_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_random_items");
    group.sample_size(10);

    for &n in &[8, 10, 12] {
        let mut rng = StdRng::seed_from_u64(42);
        let items = random_items(n, &mut rng);
        let solver = BranchAndBound::new(BnbConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| {
                let result = solver.solve(black_box(items), &Manhattan);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_bnb_budgeted(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_budget_100k");
    group.sample_size(10);

    for &n in &[20, 50] {
        let mut rng = StdRng::seed_from_u64(42);
        let items = random_items(n, &mut rng);
        let solver = BranchAndBound::new(BnbConfig::default().with_max_iterations(100_000));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| {
                let result = solver.solve(black_box(items), &Manhattan);
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_exhaustive,
    bench_bnb_chain,
    bench_bnb_random,
    bench_bnb_budgeted
);
criterion_main!(benches);
