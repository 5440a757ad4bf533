//! Cluster mapping benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pcs_bench::fixtures::Scale;
use pcs_bench::harness::TestContext;
use pcs_core::{ClusterMapping, TableConfig};

fn bench_cluster_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster/mapping");
    group.sample_size(20);

    for scale in [Scale::Tiny, Scale::Small] {
        let cached = TestContext::with_scale(scale, &TableConfig::cached());
        let uncached = TestContext::with_scale(scale, &TableConfig::new());

        group.bench_with_input(BenchmarkId::new("cached", scale.name()), &scale, |b, _| {
            b.iter(|| black_box(ClusterMapping::new().exec(&cached.table).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("uncached", scale.name()), &scale, |b, _| {
            b.iter(|| black_box(ClusterMapping::new().exec(&uncached.table).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cluster_mapping);
criterion_main!(benches);
