//! Demonstrates how the three bucketing schemes spread the same samples

use histosim_histogram::{
    accumulate, custom_distribution, memory_distribution, timing_distribution, BucketingScheme,
    HistogramResult, HistogramType, MemoryUnit, TimeUnit,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal, Normal};

fn print_histogram(title: &str, result: &HistogramResult) {
    println!("=== {title} ===");
    println!(
        "{} samples, {} buckets ({} underflow, {} overflow)",
        result.count(),
        result.boundaries().len(),
        result.underflow(),
        result.overflow()
    );
    if let Some(mean) = result.mean() {
        println!("mean: {mean:.1}");
    }
    for (bound, count) in result.non_empty() {
        let pct = result.percentage(bound).unwrap_or(0.0);
        println!("  >= {bound:>12}: {count:>6} ({pct:5.1}%)");
    }
    println!();
}

fn main() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    // Normal-like data, truncated at zero
    let normal = Normal::new(500.0_f64, 150.0).unwrap();
    let normal_samples: Vec<u64> = (0..20_000)
        .map(|_| normal.sample(&mut rng).max(0.0) as u64)
        .collect();

    // Log-normal data, the usual shape of latencies
    let log_normal = LogNormal::new(10.0, 1.5).unwrap();
    let latency_samples: Vec<u64> = (0..20_000)
        .map(|_| log_normal.sample(&mut rng) as u64)
        .collect();

    // Example 1: the same data through linear and exponential ranges
    let linear =
        custom_distribution(1, 1000, 20, HistogramType::Linear, &normal_samples).unwrap();
    print_histogram("Linear 1..1000, 20 buckets", &linear);

    let exponential =
        custom_distribution(1, 1000, 20, HistogramType::Exponential, &normal_samples).unwrap();
    print_histogram("Exponential 1..1000, 20 buckets", &exponential);

    // Example 2: timing distribution in microseconds
    let timing = timing_distribution(TimeUnit::Microsecond, &latency_samples).unwrap();
    print_histogram("Timing distribution (us)", &timing);

    // Example 3: memory distribution in kilobytes
    let memory = memory_distribution(MemoryUnit::Kilobyte, &latency_samples).unwrap();
    print_histogram("Memory distribution (KiB)", &memory);

    // Example 4: a raw functional scheme
    let scheme = BucketingScheme::functional(1.5, 40).unwrap();
    let functional = accumulate(&scheme, &normal_samples).unwrap();
    print_histogram("Functional base 1.5", &functional);

    println!("JSON: {}", linear.to_json().unwrap());
}
