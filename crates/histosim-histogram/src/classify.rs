//! Sample classification against a boundary sequence

use serde::Serialize;

use crate::types::BoundarySequence;

/// Where a sample lands relative to a boundary sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Below the first bound of a scheme with an underflow bucket
    Underflow,
    /// Inside the bucket at this index
    Bucket(usize),
    /// At or above the overflow threshold
    Overflow,
}

impl Classification {
    /// Resolve to a bucket slot in a sequence of `len` buckets
    ///
    /// Underflow is stored in the first bucket and overflow in the last.
    #[inline]
    pub fn slot(self, len: usize) -> usize {
        match self {
            Classification::Underflow => 0,
            Classification::Bucket(index) => index,
            Classification::Overflow => len - 1,
        }
    }

    pub fn is_underflow(self) -> bool {
        matches!(self, Classification::Underflow)
    }

    pub fn is_overflow(self) -> bool {
        matches!(self, Classification::Overflow)
    }
}

/// Classify `value` against `boundaries`
///
/// In-range values go to the greatest bound not above them, found by binary
/// search. Values below the first bound are underflow only when the scheme
/// has an underflow bucket; functional schemes put them in bucket 0.
#[inline]
pub fn classify(value: u64, boundaries: &BoundarySequence) -> Classification {
    let bounds = boundaries.bounds();

    if boundaries.has_underflow() && value < bounds[0] {
        return Classification::Underflow;
    }
    if value >= boundaries.overflow_threshold() {
        return Classification::Overflow;
    }

    let above = bounds.partition_point(|&bound| bound <= value);
    Classification::Bucket(above.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::generate;
    use crate::types::BucketingScheme;

    fn slots(scheme: &BucketingScheme, values: &[u64]) -> Vec<usize> {
        let boundaries = generate(scheme).unwrap();
        values
            .iter()
            .map(|&v| classify(v, &boundaries).slot(boundaries.len()))
            .collect()
    }

    #[test]
    fn test_linear_classification() {
        let scheme = BucketingScheme::linear(0, 100, 10).unwrap();
        let boundaries = generate(&scheme).unwrap();

        assert_eq!(classify(0, &boundaries), Classification::Bucket(0));
        assert_eq!(classify(10, &boundaries), Classification::Bucket(1));
        assert_eq!(classify(99, &boundaries), Classification::Bucket(9));
        assert_eq!(classify(100, &boundaries), Classification::Overflow);
        assert_eq!(classify(150, &boundaries), Classification::Overflow);

        assert_eq!(slots(&scheme, &[0, 10, 99, 100, 150]), vec![0, 1, 9, 9, 9]);
    }

    #[test]
    fn test_exponential_underflow() {
        let scheme = BucketingScheme::exponential(1, 1000, 5).unwrap();
        let boundaries = generate(&scheme).unwrap();

        let class = classify(0, &boundaries);
        assert!(class.is_underflow());
        assert_eq!(class.slot(boundaries.len()), 0);

        assert_eq!(classify(1, &boundaries), Classification::Bucket(0));
        assert_eq!(classify(15, &boundaries), Classification::Bucket(1));
        assert_eq!(classify(16, &boundaries), Classification::Bucket(2));
        assert_eq!(classify(999, &boundaries), Classification::Bucket(4));
        assert!(classify(1000, &boundaries).is_overflow());
    }

    #[test]
    fn test_functional_has_no_underflow() {
        let scheme = BucketingScheme::functional(1.5, 6).unwrap();
        let boundaries = generate(&scheme).unwrap();

        assert_eq!(classify(0, &boundaries), Classification::Bucket(0));
        assert_eq!(classify(1, &boundaries), Classification::Bucket(0));
        assert_eq!(classify(4, &boundaries), Classification::Bucket(2));
        assert_eq!(classify(6, &boundaries), Classification::Bucket(3));
        assert!(classify(7, &boundaries).is_overflow());
        assert!(classify(u64::MAX, &boundaries).is_overflow());
    }

    #[test]
    fn test_single_bucket_sequences() {
        let scheme = BucketingScheme::functional(2.0, 1).unwrap();
        assert_eq!(slots(&scheme, &[0, 1, 5]), vec![0, 0, 0]);

        let boundaries = generate(&scheme).unwrap();
        assert_eq!(classify(0, &boundaries), Classification::Bucket(0));
        assert!(classify(1, &boundaries).is_overflow());

        let scheme = BucketingScheme::linear(10, 11, 1).unwrap();
        assert_eq!(slots(&scheme, &[0, 10, 11]), vec![0, 0, 0]);
    }
}
