//! Validation of raw floating-point samples
//!
//! Sample generators and custom data sources hand over `f64` values. The
//! bucketing core only accepts non-negative integers, so every value is
//! checked here before it reaches a classifier. Malformed values fail fast
//! instead of being clamped.

use crate::error::{Error, Result};
use num_traits::ToPrimitive;

/// Convert a single raw value into a sample.
///
/// Fractional values are truncated toward zero. Negative, NaN, infinite
/// and values beyond `u64::MAX` are rejected with [`Error::InvalidSample`].
pub fn sample_from_f64(value: f64) -> Result<u64> {
    if value.is_nan() {
        return Err(Error::InvalidSample { value, reason: "not a number" });
    }
    if value.is_infinite() {
        return Err(Error::InvalidSample { value, reason: "infinite" });
    }
    if value < 0.0 {
        return Err(Error::InvalidSample { value, reason: "negative" });
    }

    value
        .trunc()
        .to_u64()
        .ok_or(Error::InvalidSample { value, reason: "exceeds u64 range" })
}

/// Validate a whole batch, stopping at the first malformed value.
pub fn validate_samples(values: &[f64]) -> Result<Vec<u64>> {
    let samples = values
        .iter()
        .map(|&v| sample_from_f64(v))
        .collect::<Result<Vec<_>>>()?;
    tracing::trace!("Validated {} raw samples", samples.len());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::{sample_from_f64, validate_samples};
    use crate::error::Error;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_integers_and_truncates_fractions() {
        assert_eq!(sample_from_f64(0.0).unwrap(), 0);
        assert_eq!(sample_from_f64(-0.0).unwrap(), 0);
        assert_eq!(sample_from_f64(42.0).unwrap(), 42);
        assert_eq!(sample_from_f64(42.9).unwrap(), 42);
    }

    #[test]
    fn test_rejects_malformed_values() {
        for bad in [-1.0, -0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e20] {
            match sample_from_f64(bad) {
                Err(Error::InvalidSample { .. }) => {}
                other => panic!("expected InvalidSample for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_samples_stops_at_first_bad_value() {
        assert_eq!(validate_samples(&[1.0, 2.5, 3.0]).unwrap(), vec![1, 2, 3]);
        assert!(validate_samples(&[]).unwrap().is_empty());

        let err = validate_samples(&[1.0, -3.0, f64::NAN]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid sample -3: negative");
    }

    proptest! {
        #[test]
        fn prop_integral_values_round_trip(v in 0u64..(1u64 << 53)) {
            prop_assert_eq!(sample_from_f64(v as f64).unwrap(), v);
        }
    }
}
