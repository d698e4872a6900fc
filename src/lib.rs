//! Histogram bucketing simulator core
//!
//! Re-exports the workspace crates under one roof:
//!
//! - [`histosim_core`]: error taxonomy, sample validation, time and memory units
//! - [`histosim_histogram`]: bucketing schemes, boundary generation, classification,
//!   accumulation and the timing/memory/custom distribution entry points
//!
//! # Example
//!
//! ```rust
//! use histosim::{accumulate, custom_distribution, BucketingScheme, HistogramType};
//!
//! let scheme = BucketingScheme::exponential(1, 1000, 5).unwrap();
//! let result = accumulate(&scheme, &[0, 3, 70, 2000]).unwrap();
//! assert_eq!(result.underflow(), 1);
//! assert_eq!(result.overflow(), 1);
//!
//! let same =
//!     custom_distribution(1, 1000, 5, HistogramType::Exponential, &[0, 3, 70, 2000]).unwrap();
//! assert_eq!(same, result);
//! ```

pub use histosim_core;
pub use histosim_histogram;

pub use histosim_core::{sample_from_f64, validate_samples, Error, MemoryUnit, Result, TimeUnit};
pub use histosim_histogram::{
    accumulate, accumulate_iter, classify, custom_distribution, custom_distribution_json,
    functional_scheme, generate, memory_distribution, memory_distribution_json,
    memory_distribution_with, timing_distribution, timing_distribution_json,
    timing_distribution_with, try_accumulate, Accumulator, BoundaryGenerator, BoundarySequence,
    BucketingScheme, Classification, ExponentialBuckets, FunctionalBuckets, HistogramResult,
    HistogramType, LinearBuckets, MemoryParameters, SchemeKind, Snapshot, TimingParameters,
};

#[cfg(feature = "parallel")]
pub use histosim_histogram::accumulate_parallel;
