//! Histogram bucketing and accumulation for telemetry-style distributions
//!
//! This crate assigns raw non-negative integer samples to the buckets of a
//! histogram and returns per-bucket counts. It supports three bucketing
//! schemes, each of which derives its bucket lower bounds once and then
//! classifies samples by binary search.
//!
//! # Key Features
//!
//! - **Functional buckets**: `floor(base^i)`, used for timing and memory
//!   distributions; no underflow bucket, exact `u128` sum of samples
//! - **Exponential buckets**: geometric spacing between explicit bounds
//! - **Linear buckets**: even spacing between explicit bounds
//! - **Underflow and overflow**: samples outside the range of a bounded
//!   scheme are stored in the first and last buckets and counted separately
//! - **Exact merging**: partial results over the same boundaries combine
//!   element-wise, optionally on the rayon pool (`parallel` feature)
//!
//! # Examples
//!
//! ## Linear Buckets
//!
//! ```rust
//! use histosim_histogram::{accumulate, BucketingScheme};
//!
//! let scheme = BucketingScheme::linear(0, 100, 10).unwrap();
//! let result = accumulate(&scheme, &[0, 10, 99, 100, 150]).unwrap();
//!
//! assert_eq!(result.get(0), Some(1));
//! assert_eq!(result.get(90), Some(3)); // 99 plus two overflow samples
//! assert_eq!(result.overflow(), 2);
//! ```
//!
//! ## Functional Buckets
//!
//! ```rust
//! use histosim_histogram::{accumulate, generate, BucketingScheme};
//!
//! let scheme = BucketingScheme::functional(2.0, 6).unwrap();
//! assert_eq!(generate(&scheme).unwrap().bounds(), &[1, 2, 4, 8, 16, 32]);
//!
//! let result = accumulate(&scheme, &[3, 5, 9]).unwrap();
//! assert_eq!(result.sum(), Some(17));
//! ```
//!
//! ## Timing Distributions
//!
//! ```rust
//! use histosim_histogram::{timing_distribution, TimeUnit};
//!
//! let result = timing_distribution(TimeUnit::Millisecond, &[3, 12, 40]).unwrap();
//! for (bound, count) in result.non_empty() {
//!     println!("{bound}ns: {count}");
//! }
//! println!("{}", result.to_json().unwrap());
//! ```
//!
//! ## Merging Partial Results
//!
//! ```rust
//! use histosim_histogram::{accumulate, BucketingScheme};
//!
//! let scheme = BucketingScheme::exponential(1, 10_000, 20).unwrap();
//! let mut left = accumulate(&scheme, &[1, 50, 700]).unwrap();
//! let right = accumulate(&scheme, &[3, 9_999]).unwrap();
//! left.merge(&right).unwrap();
//!
//! assert_eq!(left.count(), 5);
//! ```

pub mod accumulator;
pub mod builders;
pub mod classify;
pub mod distributions;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use accumulator::{
    accumulate, accumulate_iter, try_accumulate, Accumulator, HistogramResult, Snapshot,
};
#[cfg(feature = "parallel")]
pub use accumulator::accumulate_parallel;
pub use builders::{generate, ExponentialBuckets, FunctionalBuckets, LinearBuckets};
pub use classify::{classify, Classification};
pub use distributions::{
    custom_distribution, custom_distribution_json, functional_scheme, memory_distribution,
    memory_distribution_json, memory_distribution_with, timing_distribution,
    timing_distribution_json, timing_distribution_with, MemoryParameters, TimingParameters,
};
pub use traits::BoundaryGenerator;
pub use types::{BoundarySequence, BucketingScheme, HistogramType, SchemeKind};

pub use histosim_core::{Error, MemoryUnit, Result, TimeUnit};
