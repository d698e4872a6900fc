//! Simulator entry points for custom, timing and memory distributions
//!
//! These wrap the core with the unit handling and clamping a telemetry
//! histogram applies before bucketing:
//!
//! - custom distributions use an explicit linear or exponential range;
//! - timing distributions clamp raw samples to `[1, max_sample_time]` in the
//!   incoming unit, then convert to nanoseconds;
//! - memory distributions convert to bytes, then clamp to `max_bytes`.
//!
//! Timing and memory use functional bucketing whose growth base is
//! `log_base ^ (1 / buckets_per_magnitude)`.

use histosim_core::{Error, MemoryUnit, Result, TimeUnit};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::accumulator::{accumulate_iter, HistogramResult};
use crate::builders::FunctionalBuckets;
use crate::types::{BucketingScheme, HistogramType};

/// Ten minutes in nanoseconds
pub const DEFAULT_MAX_SAMPLE_TIME: u64 = 1000 * 1000 * 1000 * 60 * 10;

/// One terabyte
pub const DEFAULT_MAX_BYTES: u64 = 1 << 40;

/// Parameters of a timing distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParameters {
    /// Base of the logarithm used to determine bucketing
    pub log_base: f64,

    /// Buckets per order of magnitude of the logarithm
    pub buckets_per_magnitude: f64,

    /// Largest raw sample, in the incoming unit
    pub max_sample_time: u64,
}

impl Default for TimingParameters {
    fn default() -> Self {
        Self {
            log_base: 2.0,
            buckets_per_magnitude: 8.0,
            max_sample_time: DEFAULT_MAX_SAMPLE_TIME,
        }
    }
}

impl TimingParameters {
    /// Functional scheme covering every clamped sample in `unit`
    pub fn scheme(&self, unit: TimeUnit) -> Result<BucketingScheme> {
        functional_scheme(
            self.log_base,
            self.buckets_per_magnitude,
            unit.as_nanos(self.max_sample_time),
        )
    }

    /// Clamp a raw sample and convert it to nanoseconds
    pub fn normalize(&self, unit: TimeUnit, sample: u64) -> u64 {
        unit.as_nanos(sample.clamp(1, self.max_sample_time.max(1)))
    }
}

/// Parameters of a memory distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryParameters {
    /// Base of the logarithm used to determine bucketing
    pub log_base: f64,

    /// Buckets per order of magnitude of the logarithm
    pub buckets_per_magnitude: f64,

    /// Largest recordable value, in bytes
    pub max_bytes: u64,
}

impl Default for MemoryParameters {
    fn default() -> Self {
        Self {
            log_base: 2.0,
            buckets_per_magnitude: 16.0,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl MemoryParameters {
    /// Functional scheme covering every value up to `max_bytes`
    pub fn scheme(&self) -> Result<BucketingScheme> {
        functional_scheme(self.log_base, self.buckets_per_magnitude, self.max_bytes)
    }

    /// Convert a raw sample to bytes and clamp it
    pub fn normalize(&self, unit: MemoryUnit, sample: u64) -> u64 {
        unit.as_bytes(sample).min(self.max_bytes)
    }
}

/// Build a functional scheme whose top bucket reaches `max_value`
///
/// The bucket count is the smallest one for which `floor(base ^ (n - 1))`
/// is at least `max_value`, or the last bucket representable in `u64`.
pub fn functional_scheme(
    log_base: f64,
    buckets_per_magnitude: f64,
    max_value: u64,
) -> Result<BucketingScheme> {
    if !buckets_per_magnitude.is_finite() || buckets_per_magnitude <= 0.0 {
        return Err(Error::InvalidParameters(format!(
            "buckets_per_magnitude {buckets_per_magnitude} must be finite and positive"
        )));
    }
    if !log_base.is_finite() || log_base <= 1.0 {
        return Err(Error::invalid_base(log_base));
    }

    let base = log_base.powf(buckets_per_magnitude.recip());
    let probe = FunctionalBuckets::new(base, 1)?;

    // Start from the analytic estimate and walk up past rounding error.
    let estimate = if max_value > 1 {
        ((max_value as f64).ln() / base.ln()).ceil().max(0.0) as u32
    } else {
        0
    };
    let mut top = estimate.saturating_sub(1);
    while let Some(bound) = probe.bound_at(top) {
        if bound >= max_value || top == u32::MAX - 1 {
            break;
        }
        top += 1;
    }

    let bucket_count = top + 1;
    debug!(
        "Functional scheme base {:.6} with {} buckets for max {}",
        base, bucket_count, max_value
    );
    BucketingScheme::functional(base, bucket_count)
}

/// Accumulate samples into an explicit linear or exponential range
#[instrument(level = "debug", skip(samples), fields(samples = samples.len()))]
pub fn custom_distribution(
    range_min: u64,
    range_max: u64,
    bucket_count: u32,
    histogram_type: HistogramType,
    samples: &[u64],
) -> Result<HistogramResult> {
    let scheme = match histogram_type {
        HistogramType::Linear => BucketingScheme::linear(range_min, range_max, bucket_count)?,
        HistogramType::Exponential => {
            BucketingScheme::exponential(range_min, range_max, bucket_count)?
        }
    };
    accumulate_iter(&scheme, samples.iter().copied())
}

/// Accumulate timing samples with the default parameters
pub fn timing_distribution(unit: TimeUnit, samples: &[u64]) -> Result<HistogramResult> {
    timing_distribution_with(&TimingParameters::default(), unit, samples)
}

/// Accumulate timing samples recorded in `unit`
#[instrument(level = "debug", skip(params, samples), fields(samples = samples.len()))]
pub fn timing_distribution_with(
    params: &TimingParameters,
    unit: TimeUnit,
    samples: &[u64],
) -> Result<HistogramResult> {
    let scheme = params.scheme(unit)?;
    accumulate_iter(&scheme, samples.iter().map(|&s| params.normalize(unit, s)))
}

/// Accumulate memory samples with the default parameters
pub fn memory_distribution(unit: MemoryUnit, samples: &[u64]) -> Result<HistogramResult> {
    memory_distribution_with(&MemoryParameters::default(), unit, samples)
}

/// Accumulate memory samples recorded in `unit`
#[instrument(level = "debug", skip(params, samples), fields(samples = samples.len()))]
pub fn memory_distribution_with(
    params: &MemoryParameters,
    unit: MemoryUnit,
    samples: &[u64],
) -> Result<HistogramResult> {
    let scheme = params.scheme()?;
    accumulate_iter(&scheme, samples.iter().map(|&s| params.normalize(unit, s)))
}

/// JSON snapshot of [`custom_distribution`]
pub fn custom_distribution_json(
    range_min: u64,
    range_max: u64,
    bucket_count: u32,
    histogram_type: HistogramType,
    samples: &[u64],
) -> Result<String> {
    custom_distribution(range_min, range_max, bucket_count, histogram_type, samples)?.to_json()
}

/// JSON snapshot of [`timing_distribution`]
pub fn timing_distribution_json(unit: TimeUnit, samples: &[u64]) -> Result<String> {
    timing_distribution(unit, samples)?.to_json()
}

/// JSON snapshot of [`memory_distribution`]
pub fn memory_distribution_json(unit: MemoryUnit, samples: &[u64]) -> Result<String> {
    memory_distribution(unit, samples)?.to_json()
}
