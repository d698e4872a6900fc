//! Core types shared by the histosim crates
//!
//! This crate holds everything the bucketing core needs that is not itself
//! bucketing: the error taxonomy, validation of raw samples coming from
//! generators or user data, and the time/memory units that scale samples
//! before they are classified.
//!
//! # Example
//!
//! ```rust
//! use histosim_core::{sample_from_f64, TimeUnit};
//!
//! let raw = sample_from_f64(12.7).unwrap();
//! assert_eq!(raw, 12);
//! assert_eq!(TimeUnit::Millisecond.as_nanos(raw), 12_000_000);
//!
//! assert!(sample_from_f64(-1.0).is_err());
//! ```

pub mod error;
pub mod sample;
pub mod units;

// Re-export core types
pub use error::{Error, Result};
pub use sample::{sample_from_f64, validate_samples};
pub use units::{MemoryUnit, TimeUnit};
