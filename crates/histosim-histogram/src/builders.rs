//! Bucket boundary strategies
//!
//! Each strategy turns its parameters into strictly increasing bucket lower
//! bounds. Rounding rules are fixed per strategy:
//!
//! - linear: integer division, toward zero
//! - exponential: nearest integer, halves away from zero
//! - functional: floor
//!
//! Consecutive bounds that round to the same integer collapse into a single
//! bucket.

use histosim_core::{Error, Result};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::traits::BoundaryGenerator;
use crate::types::{BoundarySequence, BucketingScheme, SchemeKind};

/// Generate the boundary sequence for a scheme
///
/// Fails with [`Error::InvalidParameters`] when the scheme violates its
/// invariants. The output is deterministic for a given scheme.
pub fn generate(scheme: &BucketingScheme) -> Result<BoundarySequence> {
    let sequence = match *scheme {
        BucketingScheme::Functional { base, bucket_count } => {
            FunctionalBuckets::new(base, bucket_count)?.generate()
        }
        BucketingScheme::Exponential {
            lower_bound,
            upper_bound,
            bucket_count,
        } => ExponentialBuckets::new(lower_bound, upper_bound, bucket_count)?.generate(),
        BucketingScheme::Linear {
            lower_bound,
            upper_bound,
            bucket_count,
        } => LinearBuckets::new(lower_bound, upper_bound, bucket_count)?.generate(),
    };

    debug!("Generated {}", sequence);

    Ok(sequence)
}

/// Append `bound` unless it repeats the previous bound
#[inline]
fn push_distinct(bounds: &mut Vec<u64>, bound: u64) {
    if bounds.last().map_or(true, |&last| bound > last) {
        bounds.push(bound);
    }
}

fn check_range(lower_bound: u64, upper_bound: u64, bucket_count: u32) -> Result<()> {
    if bucket_count == 0 {
        return Err(Error::bucket_count_zero());
    }
    if lower_bound >= upper_bound {
        return Err(Error::bounds_not_increasing(lower_bound, upper_bound));
    }
    Ok(())
}

/// Evenly spaced buckets between explicit bounds
///
/// `bound[i] = lower + i * (upper - lower) / bucket_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBuckets {
    lower_bound: u64,
    upper_bound: u64,
    bucket_count: u32,
}

impl LinearBuckets {
    /// Create a new linear strategy
    pub fn new(lower_bound: u64, upper_bound: u64, bucket_count: u32) -> Result<Self> {
        check_range(lower_bound, upper_bound, bucket_count)?;
        Ok(Self {
            lower_bound,
            upper_bound,
            bucket_count,
        })
    }
}

impl BoundaryGenerator for LinearBuckets {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Linear
    }

    fn lower_bounds(&self) -> Vec<u64> {
        let span = self.upper_bound - self.lower_bound;

        // At least one bucket per integer: every bound in the range is used
        if u64::from(self.bucket_count) >= span {
            return (self.lower_bound..self.upper_bound).collect();
        }

        let span = u128::from(span);
        let count = u128::from(self.bucket_count);
        let mut bounds = Vec::with_capacity(self.bucket_count as usize);

        for i in 0..count {
            // i < count, so the offset stays below span and fits in u64
            let offset = (i * span / count) as u64;
            push_distinct(&mut bounds, self.lower_bound + offset);
        }

        bounds
    }

    fn overflow_threshold(&self, _bounds: &[u64]) -> u64 {
        self.upper_bound
    }

    fn requested_buckets(&self) -> u32 {
        self.bucket_count
    }
}

/// Geometrically spaced buckets between explicit bounds
///
/// `bound[i] = round(lower * (upper / lower) ^ (i / bucket_count))`. A lower
/// bound of zero keeps a `[0, 1)` first bucket and grows from 1. Bounds that
/// round up to `upper` or beyond are dropped since those values are overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialBuckets {
    lower_bound: u64,
    upper_bound: u64,
    bucket_count: u32,
}

impl ExponentialBuckets {
    /// Create a new exponential strategy
    pub fn new(lower_bound: u64, upper_bound: u64, bucket_count: u32) -> Result<Self> {
        check_range(lower_bound, upper_bound, bucket_count)?;
        Ok(Self {
            lower_bound,
            upper_bound,
            bucket_count,
        })
    }
}

impl BoundaryGenerator for ExponentialBuckets {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Exponential
    }

    fn lower_bounds(&self) -> Vec<u64> {
        let start = self.lower_bound.max(1) as f64;
        let ratio = self.upper_bound as f64 / start;
        let count = f64::from(self.bucket_count);
        let ln_ratio = ratio.ln();

        let capacity = u64::from(self.bucket_count).min(self.upper_bound - self.lower_bound);
        let mut bounds = Vec::with_capacity(capacity as usize);
        bounds.push(self.lower_bound);

        let mut i = 1;
        while i < self.bucket_count {
            let exact = start * ratio.powf(f64::from(i) / count);
            let bound = exact.round().to_u64().unwrap_or(u64::MAX);
            if bound >= self.upper_bound {
                break;
            }
            push_distinct(&mut bounds, bound);

            // Skip the indices that still round to `bound`. One step of slack
            // absorbs float error; a landing on `bound` again just collapses.
            let next = (count * ((bound as f64 + 0.5) / start).ln() / ln_ratio).floor();
            // NaN only arises when every remaining index rounds to `bound`
            let next = next.to_u32().unwrap_or(if next < 0.0 { 0 } else { u32::MAX });
            i = (i + 1).max(next.saturating_sub(1));
        }

        bounds
    }

    fn overflow_threshold(&self, _bounds: &[u64]) -> u64 {
        self.upper_bound
    }

    fn requested_buckets(&self) -> u32 {
        self.bucket_count
    }
}

/// Power-of-base buckets used for timing and memory distributions
///
/// `bound[i] = floor(base ^ i)`. Generation stops early once `base ^ i` no
/// longer fits in a `u64`. The highest bound is the overflow bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionalBuckets {
    base: f64,
    bucket_count: u32,
}

impl FunctionalBuckets {
    /// Create a new functional strategy
    pub fn new(base: f64, bucket_count: u32) -> Result<Self> {
        if bucket_count == 0 {
            return Err(Error::bucket_count_zero());
        }
        if !base.is_finite() || base <= 1.0 {
            return Err(Error::invalid_base(base));
        }
        Ok(Self { base, bucket_count })
    }

    /// Get the growth base
    pub fn base(&self) -> f64 {
        self.base
    }

    /// `floor(base ^ index)`, or `None` once it exceeds `u64`
    pub fn bound_at(&self, index: u32) -> Option<u64> {
        self.base.powf(f64::from(index)).floor().to_u64()
    }
}

impl BoundaryGenerator for FunctionalBuckets {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Functional
    }

    fn lower_bounds(&self) -> Vec<u64> {
        let ln_base = self.base.ln();
        let mut bounds = Vec::new();

        let mut i = 0;
        while i < self.bucket_count {
            let Some(bound) = self.bound_at(i) else {
                break;
            };
            push_distinct(&mut bounds, bound);

            // First index that can floor above `bound`, less one for float error
            let next = ((bound as f64 + 1.0).ln() / ln_base).floor();
            let next = next.to_u32().unwrap_or(u32::MAX);
            i = (i + 1).max(next.saturating_sub(1));
        }

        bounds
    }

    fn overflow_threshold(&self, bounds: &[u64]) -> u64 {
        bounds[bounds.len() - 1]
    }

    fn requested_buckets(&self) -> u32 {
        self.bucket_count
    }
}
