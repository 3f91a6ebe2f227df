//! Benchmarks for the pipes solver and generator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pipes::generator::generate;
use pipes::{GeneratorConfig, Grid, PuzzleOps};

/// Benchmark solving the built-in puzzle from its shuffled state.
fn bench_solve_default(c: &mut Criterion) {
    c.bench_function("solve_default", |b| {
        b.iter(|| {
            let mut grid = Grid::default_puzzle();
            black_box(grid.solve())
        })
    });
}

/// Benchmark counting every solution of a shuffled wrapping puzzle.
fn bench_count_wrapping(c: &mut Criterion) {
    let config = GeneratorConfig {
        rows: 4,
        cols: 4,
        wrapping: true,
        nb_empty: 0,
        nb_extra: 2,
    };
    let mut rng = StdRng::seed_from_u64(17);
    let mut grid = generate(&config, &mut rng).unwrap();
    grid.shuffle_orientation_with(&mut rng);

    let mut group = c.benchmark_group("count");
    group.sample_size(10);
    group.bench_function("wrapping_4x4", |b| {
        b.iter(|| black_box(&mut grid).count_solutions())
    });
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let config = GeneratorConfig {
        nb_empty: 2,
        nb_extra: 3,
        ..GeneratorConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("generate_5x5", |b| {
        b.iter(|| generate(black_box(&config), &mut rng).unwrap())
    });
}

fn bench_is_won(c: &mut Criterion) {
    let grid = Grid::default_solution();

    c.bench_function("is_won", |b| b.iter(|| black_box(&grid).is_won()));
}

criterion_group!(
    benches,
    bench_solve_default,
    bench_count_wrapping,
    bench_generate,
    bench_is_won
);
criterion_main!(benches);
