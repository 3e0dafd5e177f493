//! Wishart clustering benchmarks.
//!
//! `neighbours` isolates the brute-force k-nearest-neighbour query, which
//! dominates a run. `wishart_run` measures the full pipeline, whose scan cost
//! grows with the neighbour count.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use wishart_benches::{
    error::BenchSetupError,
    params::{NeighbourBenchParams, ScanBenchParams},
    source::{SyntheticConfig, blob_source},
};
use wishart_core::{BruteForceOracle, ExecutionStrategy, NeighbourOracle, WishartBuilder};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 8;

/// Blobs per dataset.
const BLOBS: usize = 4;

/// Points per blob for each benchmarked size.
const PER_BLOB: &[usize] = &[50, 125, 250];

/// Neighbour counts swept by the full-run group.
const NEIGHBOUR_COUNTS: &[usize] = &[5, 10, 20];

fn blob_config(per_blob: usize) -> SyntheticConfig {
    SyntheticConfig {
        blobs: BLOBS,
        per_blob,
        dimensions: DIMENSIONS,
        seed: SEED,
    }
}

fn oracles() -> Vec<BruteForceOracle> {
    vec![
        BruteForceOracle::sequential(),
        #[cfg(feature = "parallel")]
        BruteForceOracle::parallel(),
    ]
}

fn neighbours_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("neighbours");
    group.sample_size(20);

    for &per_blob in PER_BLOB {
        let config = blob_config(per_blob);
        let source = blob_source(&config)?;
        for oracle in oracles() {
            let params = NeighbourBenchParams {
                point_count: config.point_count(),
                parallel: oracle.is_parallel(),
            };
            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &(&source, oracle),
                |b, &(source, oracle)| {
                    b.iter(|| oracle.neighbours(source, 10));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn wishart_run_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("wishart_run");
    group.sample_size(10);

    let config = blob_config(250);
    let source = blob_source(&config)?;
    for &wishart_neighbors in NEIGHBOUR_COUNTS {
        let wishart = WishartBuilder::new()
            .with_wishart_neighbors(wishart_neighbors)
            .with_execution_strategy(ExecutionStrategy::Auto)
            .build()?;
        let params = ScanBenchParams {
            point_count: config.point_count(),
            wishart_neighbors,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &(&source, &wishart),
            |b, &(source, wishart)| {
                b.iter(|| wishart.run(source));
            },
        );
    }

    group.finish();
    Ok(())
}

fn neighbours(c: &mut Criterion) {
    if let Err(err) = neighbours_impl(c) {
        panic!("neighbours benchmark setup failed: {err}");
    }
}

fn wishart_run(c: &mut Criterion) {
    if let Err(err) = wishart_run_impl(c) {
        panic!("wishart_run benchmark setup failed: {err}");
    }
}

criterion_group!(benches, neighbours, wishart_run);
criterion_main!(benches);
