//! Benchmarks for boundary generation and sample accumulation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use histosim::{accumulate, generate, timing_distribution, BucketingScheme, TimeUnit};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

/// Generate log-normal samples, the usual shape of latencies
fn generate_samples(size: usize) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let dist = LogNormal::new(9.0, 2.0).unwrap();
    (0..size).map(|_| dist.sample(&mut rng) as u64).collect()
}

fn schemes() -> Vec<(&'static str, BucketingScheme)> {
    vec![
        ("linear", BucketingScheme::linear(1, 100_000, 100).unwrap()),
        ("exponential", BucketingScheme::exponential(1, 100_000, 100).unwrap()),
        ("functional", BucketingScheme::functional(2f64.powf(0.125), 320).unwrap()),
    ]
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for (name, scheme) in schemes() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &scheme, |b, scheme| {
            b.iter(|| black_box(generate(scheme).unwrap()));
        });
    }

    group.finish();
}

fn bench_accumulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulate");

    for &size in &[1_000, 10_000, 100_000] {
        let samples = generate_samples(size);

        for (name, scheme) in schemes() {
            group.bench_with_input(
                BenchmarkId::new(name, size),
                &(&scheme, &samples),
                |b, (scheme, samples)| {
                    b.iter(|| black_box(accumulate(scheme, samples).unwrap()));
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("timing_ns", size), &samples, |b, samples| {
            b.iter(|| black_box(timing_distribution(TimeUnit::Nanosecond, samples).unwrap()));
        });

        #[cfg(feature = "parallel")]
        {
            let scheme = BucketingScheme::exponential(1, 100_000, 100).unwrap();
            group.bench_with_input(
                BenchmarkId::new("exponential_parallel", size),
                &samples,
                |b, samples| {
                    b.iter(|| black_box(histosim::accumulate_parallel(&scheme, samples).unwrap()));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_accumulate);
criterion_main!(benches);
