//! Core types for bucketing schemes and boundary sequences

use std::fmt;

use histosim_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::builders::{ExponentialBuckets, FunctionalBuckets, LinearBuckets};

/// Discriminant of a [`BucketingScheme`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    Functional,
    Exponential,
    Linear,
}

impl SchemeKind {
    /// Whether values below the first boundary are reported as underflow.
    ///
    /// Only schemes with an explicit lower bound have an underflow bucket.
    pub fn has_underflow(self) -> bool {
        !matches!(self, SchemeKind::Functional)
    }

    /// Whether accumulation keeps an exact sum of the recorded samples
    pub fn tracks_sum(self) -> bool {
        matches!(self, SchemeKind::Functional)
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemeKind::Functional => "functional",
            SchemeKind::Exponential => "exponential",
            SchemeKind::Linear => "linear",
        };
        f.write_str(name)
    }
}

/// Integer discriminator used by the custom-distribution entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramType {
    Linear,
    Exponential,
}

impl TryFrom<i32> for HistogramType {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(HistogramType::Linear),
            1 => Ok(HistogramType::Exponential),
            e => Err(Error::unknown_discriminator("histogram_type", e)),
        }
    }
}

/// A bucketing scheme and its parameters
///
/// Use the checked constructors ([`BucketingScheme::linear`] and friends) to
/// reject invalid parameters up front. Schemes built directly from the
/// variants are validated again when boundaries are generated.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketingScheme {
    /// Geometric buckets `floor(base^i)` with no explicit bounds
    Functional { base: f64, bucket_count: u32 },
    /// Geometric buckets between explicit bounds
    Exponential {
        lower_bound: u64,
        upper_bound: u64,
        bucket_count: u32,
    },
    /// Evenly spaced buckets between explicit bounds
    Linear {
        lower_bound: u64,
        upper_bound: u64,
        bucket_count: u32,
    },
}

impl BucketingScheme {
    /// Create a validated functional scheme
    pub fn functional(base: f64, bucket_count: u32) -> Result<Self> {
        let scheme = Self::Functional { base, bucket_count };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Create a validated exponential scheme
    pub fn exponential(lower_bound: u64, upper_bound: u64, bucket_count: u32) -> Result<Self> {
        let scheme = Self::Exponential {
            lower_bound,
            upper_bound,
            bucket_count,
        };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Create a validated linear scheme
    pub fn linear(lower_bound: u64, upper_bound: u64, bucket_count: u32) -> Result<Self> {
        let scheme = Self::Linear {
            lower_bound,
            upper_bound,
            bucket_count,
        };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Check the scheme's invariants
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Functional { base, bucket_count } => {
                FunctionalBuckets::new(base, bucket_count).map(|_| ())
            }
            Self::Exponential {
                lower_bound,
                upper_bound,
                bucket_count,
            } => ExponentialBuckets::new(lower_bound, upper_bound, bucket_count).map(|_| ()),
            Self::Linear {
                lower_bound,
                upper_bound,
                bucket_count,
            } => LinearBuckets::new(lower_bound, upper_bound, bucket_count).map(|_| ()),
        }
    }

    pub fn kind(&self) -> SchemeKind {
        match self {
            Self::Functional { .. } => SchemeKind::Functional,
            Self::Exponential { .. } => SchemeKind::Exponential,
            Self::Linear { .. } => SchemeKind::Linear,
        }
    }

    /// Requested number of buckets, before equal boundaries are collapsed
    pub fn bucket_count(&self) -> u32 {
        match *self {
            Self::Functional { bucket_count, .. }
            | Self::Exponential { bucket_count, .. }
            | Self::Linear { bucket_count, .. } => bucket_count,
        }
    }

    pub fn has_underflow(&self) -> bool {
        self.kind().has_underflow()
    }
}

/// Ordered, strictly increasing bucket lower bounds
///
/// Produced once per scheme by [`generate`](crate::generate) and immutable
/// afterwards. Besides the bounds themselves it records whether the scheme
/// has an underflow bucket and the threshold at and above which samples
/// count as overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundarySequence {
    kind: SchemeKind,
    bounds: Vec<u64>,
    overflow_threshold: u64,
}

impl BoundarySequence {
    /// Assemble a sequence from already strictly increasing, non-empty bounds
    pub(crate) fn new(kind: SchemeKind, bounds: Vec<u64>, overflow_threshold: u64) -> Self {
        debug_assert!(!bounds.is_empty());
        debug_assert!(bounds.windows(2).all(|w| w[0] < w[1]));
        Self {
            kind,
            bounds,
            overflow_threshold,
        }
    }

    /// Get the bucket lower bounds
    pub fn bounds(&self) -> &[u64] {
        &self.bounds
    }

    /// Get the number of buckets
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Always `false`: a generated sequence has at least one bucket
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn kind(&self) -> SchemeKind {
        self.kind
    }

    pub fn has_underflow(&self) -> bool {
        self.kind.has_underflow()
    }

    /// Samples at or above this value are classified as overflow
    pub fn overflow_threshold(&self) -> u64 {
        self.overflow_threshold
    }

    /// Lowest bucket bound
    pub fn first(&self) -> u64 {
        self.bounds[0]
    }

    /// Highest bucket bound
    pub fn last(&self) -> u64 {
        self.bounds[self.bounds.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.bounds.iter().copied()
    }

    /// Describe the first difference from `other`, or `None` when equal
    ///
    /// Checks the kind, then the bucket count, then each bound in order and
    /// finally the overflow threshold.
    pub fn difference(&self, other: &BoundarySequence) -> Option<(String, String)> {
        if self.kind != other.kind {
            return Some((format!("{} buckets", self.kind), format!("{} buckets", other.kind)));
        }
        if self.len() != other.len() {
            return Some((format!("{} buckets", self.len()), format!("{} buckets", other.len())));
        }
        if let Some((i, (a, b))) = self
            .iter()
            .zip(other.iter())
            .enumerate()
            .find(|(_, (a, b))| a != b)
        {
            return Some((format!("bucket {i} at {a}"), format!("bucket {i} at {b}")));
        }
        if self.overflow_threshold != other.overflow_threshold {
            return Some((
                format!("overflow at {}", self.overflow_threshold),
                format!("overflow at {}", other.overflow_threshold),
            ));
        }
        None
    }
}

impl fmt::Display for BoundarySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} buckets [{}, {}], overflow at {}",
            self.kind,
            self.first(),
            self.last(),
            self.overflow_threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_constructors_reject_invalid_parameters() {
        assert!(BucketingScheme::linear(0, 100, 10).is_ok());
        assert!(BucketingScheme::linear(0, 100, 0).is_err());
        assert!(BucketingScheme::linear(100, 100, 10).is_err());
        assert!(BucketingScheme::exponential(50, 10, 10).is_err());
        assert!(BucketingScheme::functional(1.0, 10).is_err());
        assert!(BucketingScheme::functional(0.5, 10).is_err());
        assert!(BucketingScheme::functional(f64::NAN, 10).is_err());
        assert!(BucketingScheme::functional(f64::INFINITY, 10).is_err());
        assert!(BucketingScheme::functional(2.0, 0).is_err());
    }

    #[test]
    fn test_underflow_capability() {
        assert!(!BucketingScheme::functional(2.0, 8).unwrap().has_underflow());
        assert!(BucketingScheme::exponential(1, 1000, 5).unwrap().has_underflow());
        assert!(BucketingScheme::linear(1, 1000, 5).unwrap().has_underflow());

        assert!(SchemeKind::Functional.tracks_sum());
        assert!(!SchemeKind::Linear.tracks_sum());
    }

    #[test]
    fn test_histogram_type_discriminator() {
        assert_eq!(HistogramType::try_from(0).unwrap(), HistogramType::Linear);
        assert_eq!(HistogramType::try_from(1).unwrap(), HistogramType::Exponential);
        assert!(HistogramType::try_from(2).is_err());
    }

    #[test]
    fn test_boundary_difference() {
        let seq = |scheme: BucketingScheme| crate::generate(&scheme).unwrap();
        let base = seq(BucketingScheme::linear(0, 100, 10).unwrap());

        assert_eq!(base.difference(&base.clone()), None);
        assert_eq!(
            base.difference(&seq(BucketingScheme::exponential(0, 100, 10).unwrap())),
            Some(("linear buckets".to_string(), "exponential buckets".to_string()))
        );
        assert_eq!(
            base.difference(&seq(BucketingScheme::linear(0, 100, 5).unwrap())),
            Some(("10 buckets".to_string(), "5 buckets".to_string()))
        );
        assert_eq!(
            base.difference(&seq(BucketingScheme::linear(0, 200, 10).unwrap())),
            Some(("bucket 1 at 10".to_string(), "bucket 1 at 20".to_string()))
        );
        assert_eq!(
            base.difference(&seq(BucketingScheme::linear(0, 101, 10).unwrap())),
            Some(("overflow at 100".to_string(), "overflow at 101".to_string()))
        );
    }

    #[test]
    fn test_bucket_count_accessor() {
        let scheme = BucketingScheme::Exponential {
            lower_bound: 1,
            upper_bound: 500,
            bucket_count: 20,
        };
        assert_eq!(scheme.bucket_count(), 20);
        assert_eq!(scheme.kind(), SchemeKind::Exponential);
        assert_eq!(scheme.kind().to_string(), "exponential");
    }
}
