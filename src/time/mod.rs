//! Logical-time utilities for causal versioning.

pub mod vector;

// Re-export for convenience
pub use vector::{compare, ClockEntry, VectorClock};

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, used to stamp clock updates.
///
/// Advisory only; never consulted by the comparison algorithm, so a host
/// clock before the epoch degrades to zero rather than failing.
pub(crate) fn wall_clock_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
