//! Bin mapping benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pcs_bench::fixtures::Scale;
use pcs_bench::harness::TestContext;
use pcs_core::{BinCountRule, BinMapping, MultiBinMapping, TableConfig};

fn bench_bin_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("binning/pairwise");
    group.sample_size(20);

    for scale in [Scale::Tiny, Scale::Small] {
        let ctx = TestContext::with_scale(scale, &TableConfig::cached());
        let memory = ctx.memory_table();

        group.bench_with_input(BenchmarkId::new("out_of_core", scale.name()), &scale, |b, _| {
            b.iter(|| black_box(BinMapping::default().exec(&ctx.table).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("memory", scale.name()), &scale, |b, _| {
            b.iter(|| black_box(BinMapping::default().exec(&memory).unwrap()));
        });
    }

    group.finish();
}

fn bench_bin_count_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("binning/rule");
    let ctx = TestContext::with_scale(Scale::Small, &TableConfig::cached());
    let memory = ctx.memory_table();

    for (name, rule) in [("sturges", BinCountRule::Sturges), ("scott", BinCountRule::Scott)] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(BinMapping::new(rule).nbins(&memory).unwrap()));
        });
    }

    group.finish();
}

fn bench_multi_bin_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("binning/multi");
    group.sample_size(20);

    for scale in [Scale::Tiny, Scale::Small] {
        let ctx = TestContext::with_scale(scale, &TableConfig::cached());

        group.bench_function(scale.name(), |b| {
            b.iter(|| black_box(MultiBinMapping::default().exec(&ctx.table).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_bin_mapping,
    bench_bin_count_rules,
    bench_multi_bin_mapping,
);
criterion_main!(benches);
