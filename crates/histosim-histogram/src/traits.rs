//! Core traits for boundary generation

use tracing::debug;

use crate::types::{BoundarySequence, SchemeKind};

/// Trait for strategies that derive bucket lower bounds from their parameters
///
/// Implementors validate their parameters on construction, so generation
/// itself cannot fail.
pub trait BoundaryGenerator {
    /// Which scheme this strategy implements
    fn kind(&self) -> SchemeKind;

    /// Compute the strictly increasing bucket lower bounds
    ///
    /// Consecutive equal bounds are collapsed, so the result may be shorter
    /// than [`requested_buckets`](Self::requested_buckets). It is never empty.
    fn lower_bounds(&self) -> Vec<u64>;

    /// Threshold at and above which a sample is overflow
    fn overflow_threshold(&self, bounds: &[u64]) -> u64;

    /// Get the requested number of buckets
    fn requested_buckets(&self) -> u32;

    /// Produce the full boundary sequence
    fn generate(&self) -> BoundarySequence {
        let bounds = self.lower_bounds();
        let requested = self.requested_buckets() as usize;
        if bounds.len() < requested {
            debug!(
                "Collapsed {} of {} requested {} buckets",
                requested - bounds.len(),
                requested,
                self.kind()
            );
        }
        let overflow_threshold = self.overflow_threshold(&bounds);
        BoundarySequence::new(self.kind(), bounds, overflow_threshold)
    }
}
