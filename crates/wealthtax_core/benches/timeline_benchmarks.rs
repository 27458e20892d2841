//! Criterion benchmarks for wealthtax_core
//!
//! Run with: cargo bench -p wealthtax_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use wealthtax_core::analysis::{
    SensitivityParameter, SweepParameter, default_ranges, sweep, tornado,
};
use wealthtax_core::config::catalog::{self, ScenarioKind};
use wealthtax_core::cost_benefit::compute_timeline;
use wealthtax_core::model::Population;

fn bench_baseline_timeline(c: &mut Criterion) {
    let bundle = catalog::scenario(ScenarioKind::Baseline).expect("baseline builds");

    c.bench_function("baseline_timeline", |b| {
        b.iter(|| compute_timeline(black_box(&bundle)))
    });
}

fn bench_population_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("population_size");

    for count in [250, 2_500, 25_000] {
        let population = Population::synthetic(7, count, 2245.2).expect("valid population");
        let bundle = catalog::builder(ScenarioKind::Baseline)
            .population(population)
            .build()
            .expect("scenario builds");
        group.bench_with_input(BenchmarkId::from_parameter(count), &bundle, |b, bundle| {
            b.iter(|| compute_timeline(black_box(bundle)))
        });
    }

    group.finish();
}

fn bench_sensitivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity");
    let base = catalog::builder(ScenarioKind::Baseline);
    let ranges = default_ranges();

    group.bench_function("tornado_default", |b| {
        b.iter(|| tornado(black_box(&base), black_box(&ranges)))
    });

    let elasticity = SweepParameter::new(SensitivityParameter::Elasticity, 0.0, 2.0, 50);
    group.bench_function("sweep_elasticity_50", |b| {
        b.iter(|| sweep(black_box(&base), black_box(&elasticity)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_baseline_timeline,
    bench_population_size,
    bench_sensitivity
);
criterion_main!(benches);
