//! Time and memory units applied to samples before bucketing
//!
//! Timing samples are bucketed in nanoseconds and memory samples in bytes.
//! Conversion is a plain input-scaling step that saturates at `u64::MAX`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Unit of a raw timing sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    /// Number of nanoseconds in one unit
    pub fn nanos_per_unit(self) -> u64 {
        match self {
            TimeUnit::Nanosecond => 1,
            TimeUnit::Microsecond => 1_000,
            TimeUnit::Millisecond => 1_000_000,
            TimeUnit::Second => 1_000_000_000,
            TimeUnit::Minute => 60 * 1_000_000_000,
            TimeUnit::Hour => 60 * 60 * 1_000_000_000,
            TimeUnit::Day => 24 * 60 * 60 * 1_000_000_000,
        }
    }

    /// Convert `duration` expressed in this unit to nanoseconds
    pub fn as_nanos(self, duration: u64) -> u64 {
        duration.saturating_mul(self.nanos_per_unit())
    }
}

impl TryFrom<i32> for TimeUnit {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(TimeUnit::Nanosecond),
            1 => Ok(TimeUnit::Microsecond),
            2 => Ok(TimeUnit::Millisecond),
            3 => Ok(TimeUnit::Second),
            4 => Ok(TimeUnit::Minute),
            5 => Ok(TimeUnit::Hour),
            6 => Ok(TimeUnit::Day),
            e => Err(Error::unknown_discriminator("time_unit", e)),
        }
    }
}

/// Unit of a raw memory sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
}

impl MemoryUnit {
    /// Number of bytes in one unit (powers of 1024)
    pub fn bytes_per_unit(self) -> u64 {
        match self {
            MemoryUnit::Byte => 1,
            MemoryUnit::Kilobyte => 1 << 10,
            MemoryUnit::Megabyte => 1 << 20,
            MemoryUnit::Gigabyte => 1 << 30,
        }
    }

    /// Convert `value` expressed in this unit to bytes
    pub fn as_bytes(self, value: u64) -> u64 {
        value.saturating_mul(self.bytes_per_unit())
    }
}

impl TryFrom<i32> for MemoryUnit {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(MemoryUnit::Byte),
            1 => Ok(MemoryUnit::Kilobyte),
            2 => Ok(MemoryUnit::Megabyte),
            3 => Ok(MemoryUnit::Gigabyte),
            e => Err(Error::unknown_discriminator("memory_unit", e)),
        }
    }
}
