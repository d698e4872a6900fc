//! Error types for histogram bucketing
//!
//! Provides a unified error type for all histosim crates.

use thiserror::Error;

/// Core error type for bucketing and accumulation
#[derive(Error, Debug)]
pub enum Error {
    /// Bucketing scheme parameters violate their invariants
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A raw sample could not be turned into a non-negative integer
    #[error("Invalid sample {value}: {reason}")]
    InvalidSample { value: f64, reason: &'static str },

    /// Two partial results were built from different boundary sequences
    ///
    /// `expected` and `actual` describe the first point where they differ.
    #[error("Boundary mismatch: expected {expected}, got {actual}")]
    BoundaryMismatch { expected: String, actual: String },

    /// Snapshot could not be rendered
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a zero bucket count
    pub fn bucket_count_zero() -> Self {
        Self::InvalidParameters("bucket_count must be at least 1".to_string())
    }

    /// Create an error for non-monotonic bounds
    pub fn bounds_not_increasing(lower: u64, upper: u64) -> Self {
        Self::InvalidParameters(format!(
            "lower_bound {lower} must be strictly less than upper_bound {upper}"
        ))
    }

    /// Create an error for a functional base that does not grow
    pub fn invalid_base(base: f64) -> Self {
        Self::InvalidParameters(format!("base {base} must be finite and greater than 1"))
    }

    /// Create an error for an unknown integer discriminator
    pub fn unknown_discriminator(kind: &str, value: i32) -> Self {
        Self::InvalidParameters(format!("unknown {kind} discriminator {value}"))
    }
}
