//! Criterion benchmarks for filtering: uncached scans, cache hits, summaries.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use footprint_core::types::{BuildingQuery, Feature, FeatureCollection};
use footprint_engine::{summarize, CacheConfig, QueryEngine};
use footprint_store::FeatureStore;

const FEATURES: usize = 10_000;
const TYPES: [&str; 4] = ["residential", "office", "retail", "industrial"];

fn city() -> FeatureStore {
    let features = (0..FEATURES)
        .map(|i| {
            let lon = (i % 100) as f64 * 0.01;
            let lat = (i / 100) as f64 * 0.01;
            let ring = vec![
                vec![lon, lat],
                vec![lon + 0.005, lat],
                vec![lon + 0.005, lat + 0.005],
                vec![lon, lat + 0.005],
                vec![lon, lat],
            ];
            Feature::new(ring, (i % 120) as f64, TYPES[i % TYPES.len()])
        })
        .collect::<FeatureCollection>();
    FeatureStore::from_collection(features)
}

fn bench_filter_uncached(c: &mut Criterion) {
    let engine = QueryEngine::new(city(), CacheConfig::disabled());
    let query = BuildingQuery::new()
        .min_height(30.0)
        .building_type("office")
        .bbox("0.1,0.1,0.6,0.6");

    let mut g = c.benchmark_group("filter");
    g.throughput(Throughput::Elements(FEATURES as u64));
    g.bench_function("uncached", |b| {
        b.iter(|| black_box(engine.filter_buildings(&query)).unwrap());
    });
    g.finish();
}

fn bench_filter_cached(c: &mut Criterion) {
    let engine = QueryEngine::new(city(), CacheConfig::default());
    let query = BuildingQuery::new().min_height(30.0).bbox("0.1,0.1,0.6,0.6");
    engine.filter_buildings(&query).unwrap();

    let mut g = c.benchmark_group("filter");
    g.throughput(Throughput::Elements(1));
    g.bench_function("cache_hit", |b| {
        b.iter(|| black_box(engine.filter_buildings(&query)).unwrap());
    });
    g.finish();
}

fn bench_summary(c: &mut Criterion) {
    let store = city();
    let mut g = c.benchmark_group("summary");
    g.throughput(Throughput::Elements(FEATURES as u64));
    g.bench_function("summarize", |b| {
        b.iter(|| black_box(summarize(store.all())));
    });
    g.finish();
}

criterion_group!(benches, bench_filter_uncached, bench_filter_cached, bench_summary);
criterion_main!(benches);
