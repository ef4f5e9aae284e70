use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use sensorcast::{Reading, Sampler, SubscriptionFilter, Topic, WireFormat};

fn bench_encode(c: &mut Criterion) {
    let reading = Reading::new(Topic::Pressure, 1013);
    c.bench_function("Reading::encode tagged", |b| {
        b.iter(|| black_box(reading).encode(black_box(WireFormat::Tagged)))
    });
    c.bench_function("Reading::encode plain", |b| {
        b.iter(|| black_box(reading).encode(black_box(WireFormat::Plain)))
    });
}

fn bench_parse_tagged(c: &mut Criterion) {
    c.bench_function("Reading::parse_tagged", |b| {
        b.iter(|| Reading::parse_tagged(black_box("Humidity 65%")))
    });
}

fn bench_filter_matches(c: &mut Criterion) {
    let filter = SubscriptionFilter::topic(Topic::Temperature);
    let hit = b"Temperature 22\xC2\xB0C";
    let miss = b"Pressure 1001hPa";
    c.bench_function("SubscriptionFilter::matches hit", |b| {
        b.iter(|| filter.matches(black_box(hit)))
    });
    c.bench_function("SubscriptionFilter::matches miss", |b| {
        b.iter(|| filter.matches(black_box(miss)))
    });
}

fn bench_sampler(c: &mut Criterion) {
    // фиксированный seed, чтобы прогоны были сравнимы
    let mut sampler = Sampler::with_rng(StdRng::seed_from_u64(42));
    c.bench_function("Sampler::next_reading", |b| {
        b.iter(|| black_box(sampler.next_reading()))
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_parse_tagged,
    bench_filter_matches,
    bench_sampler,
);
criterion_main!(benches);
