//! Histogram accumulation
//!
//! An [`Accumulator`] owns a boundary sequence and one counter per bucket.
//! Samples are classified one at a time and never retained. Partial results
//! built from the same boundaries merge exactly, which is what the parallel
//! path relies on.

use std::collections::BTreeMap;

use histosim_core::{validate_samples, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::builders::generate;
use crate::classify::{classify, Classification};
use crate::types::{BoundarySequence, BucketingScheme};

/// Streaming accumulator over a fixed boundary sequence
#[derive(Debug, Clone)]
pub struct Accumulator {
    boundaries: BoundarySequence,
    counts: Vec<u64>,
    count: u64,
    sum: u128,
    underflow: u64,
    overflow: u64,
}

impl Accumulator {
    /// Generate boundaries for `scheme` and start with empty buckets
    pub fn new(scheme: &BucketingScheme) -> Result<Self> {
        Ok(Self::from_boundaries(generate(scheme)?))
    }

    /// Start with empty buckets over already generated boundaries
    pub fn from_boundaries(boundaries: BoundarySequence) -> Self {
        let counts = vec![0; boundaries.len()];
        Self {
            boundaries,
            counts,
            count: 0,
            sum: 0,
            underflow: 0,
            overflow: 0,
        }
    }

    pub fn boundaries(&self) -> &BoundarySequence {
        &self.boundaries
    }

    /// Record a single sample
    #[inline]
    pub fn record(&mut self, value: u64) -> Classification {
        self.record_n(value, 1)
    }

    /// Record `n` observations of the same sample
    #[inline]
    pub fn record_n(&mut self, value: u64, n: u64) -> Classification {
        let class = classify(value, &self.boundaries);
        let slot = class.slot(self.counts.len());

        self.counts[slot] = self.counts[slot].saturating_add(n);
        self.count = self.count.saturating_add(n);
        self.sum = self.sum.saturating_add(u128::from(value) * u128::from(n));
        match class {
            Classification::Underflow => self.underflow = self.underflow.saturating_add(n),
            Classification::Overflow => self.overflow = self.overflow.saturating_add(n),
            Classification::Bucket(_) => {}
        }

        class
    }

    /// Number of samples recorded so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Freeze the counts into a result
    pub fn finish(self) -> HistogramResult {
        let sum = self.boundaries.kind().tracks_sum().then_some(self.sum);
        HistogramResult {
            boundaries: self.boundaries,
            counts: self.counts,
            count: self.count,
            sum,
            underflow: self.underflow,
            overflow: self.overflow,
        }
    }
}

impl Extend<u64> for Accumulator {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for value in iter {
            self.record(value);
        }
    }
}

/// Per-bucket counts produced by accumulating samples
///
/// Buckets are keyed by their lower bound in ascending order and every
/// bound of the boundary sequence is present, including empty buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramResult {
    boundaries: BoundarySequence,
    counts: Vec<u64>,
    count: u64,
    sum: Option<u128>,
    underflow: u64,
    overflow: u64,
}

impl HistogramResult {
    /// A result with every bucket empty
    pub fn empty(boundaries: BoundarySequence) -> Self {
        Accumulator::from_boundaries(boundaries).finish()
    }

    pub fn boundaries(&self) -> &BoundarySequence {
        &self.boundaries
    }

    /// Get counts aligned with [`boundaries`](Self::boundaries)
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Iterate `(lower bound, count)` pairs in ascending bucket order
    pub fn values(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.boundaries.iter().zip(self.counts.iter().copied())
    }

    /// Iterate only buckets with at least one sample
    pub fn non_empty(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.values().filter(|&(_, count)| count > 0)
    }

    /// Count of the bucket whose lower bound is exactly `bound`
    pub fn get(&self, bound: u64) -> Option<u64> {
        self.boundaries
            .bounds()
            .binary_search(&bound)
            .ok()
            .map(|slot| self.counts[slot])
    }

    /// Get the counts as an ordered map
    pub fn to_map(&self) -> BTreeMap<u64, u64> {
        self.values().collect()
    }

    /// Get the total number of samples
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Exact sum of all samples, kept for functional schemes only
    pub fn sum(&self) -> Option<u128> {
        self.sum
    }

    /// Mean sample value, `None` without a sum or without samples
    pub fn mean(&self) -> Option<f64> {
        match self.sum {
            Some(sum) if self.count > 0 => Some(sum as f64 / self.count as f64),
            _ => None,
        }
    }

    /// Samples that fell below the first bound
    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    /// Samples at or above the overflow threshold
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Share of all samples in the bucket at `bound`, as a percentage
    pub fn percentage(&self, bound: u64) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        self.get(bound)
            .map(|count| count as f64 * 100.0 / self.count as f64)
    }

    /// Add another partial result into this one
    ///
    /// Both results must come from the same boundary sequence. Merging is
    /// associative and commutative.
    pub fn merge(&mut self, other: &HistogramResult) -> Result<()> {
        if let Some((expected, actual)) = self.boundaries.difference(&other.boundaries) {
            return Err(Error::BoundaryMismatch { expected, actual });
        }
        self.absorb(other);
        Ok(())
    }

    /// Merge without checking boundaries; callers guarantee they match
    pub(crate) fn absorb(&mut self, other: &HistogramResult) {
        for (mine, &theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine = mine.saturating_add(theirs);
        }
        self.count = self.count.saturating_add(other.count);
        self.underflow = self.underflow.saturating_add(other.underflow);
        self.overflow = self.overflow.saturating_add(other.overflow);
        self.sum = match (self.sum, other.sum) {
            (Some(a), Some(b)) => Some(a.saturating_add(b)),
            _ => None,
        };
    }

    /// Serializable view of the result
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            values: self.to_map(),
            sum: self.sum,
            count: self.count,
            underflow: self.underflow,
            overflow: self.overflow,
        }
    }

    /// Render the snapshot as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

/// Plain-data form of a [`HistogramResult`] for rendering layers
///
/// `values` serializes as a JSON object keyed by the stringified lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub values: BTreeMap<u64, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<u128>,
    pub count: u64,
    pub underflow: u64,
    pub overflow: u64,
}

/// Accumulate `samples` into the buckets of `scheme`
#[instrument(level = "debug", skip(samples), fields(samples = samples.len()))]
pub fn accumulate(scheme: &BucketingScheme, samples: &[u64]) -> Result<HistogramResult> {
    accumulate_iter(scheme, samples.iter().copied())
}

/// Accumulate any stream of samples
pub fn accumulate_iter<I>(scheme: &BucketingScheme, samples: I) -> Result<HistogramResult>
where
    I: IntoIterator<Item = u64>,
{
    let mut acc = Accumulator::new(scheme)?;
    acc.extend(samples);
    debug!(
        "Accumulated {} samples ({} underflow, {} overflow)",
        acc.count, acc.underflow, acc.overflow
    );
    Ok(acc.finish())
}

/// Validate raw floating-point samples, then accumulate them
///
/// Fails with [`Error::InvalidSample`] on the first negative or non-finite
/// value; nothing is accumulated in that case.
pub fn try_accumulate(scheme: &BucketingScheme, raw: &[f64]) -> Result<HistogramResult> {
    let samples = validate_samples(raw)?;
    accumulate(scheme, &samples)
}

#[cfg(feature = "parallel")]
const MIN_CHUNK_LEN: usize = 4096;

/// Accumulate on the rayon pool by partitioning the samples
///
/// Each chunk produces a partial result over shared boundaries and the
/// partials are merged, so the output equals [`accumulate`].
#[cfg(feature = "parallel")]
#[instrument(level = "debug", skip(samples), fields(samples = samples.len()))]
pub fn accumulate_parallel(scheme: &BucketingScheme, samples: &[u64]) -> Result<HistogramResult> {
    use rayon::prelude::*;

    let boundaries = generate(scheme)?;
    let chunk_len = (samples.len() / rayon::current_num_threads()).max(MIN_CHUNK_LEN);
    debug!("Partitioning into chunks of {} samples", chunk_len);

    let result = samples
        .par_chunks(chunk_len)
        .map(|chunk| {
            let mut acc = Accumulator::from_boundaries(boundaries.clone());
            acc.extend(chunk.iter().copied());
            acc.finish()
        })
        .reduce(
            || HistogramResult::empty(boundaries.clone()),
            |mut left, right| {
                left.absorb(&right);
                left
            },
        );

    Ok(result)
}
