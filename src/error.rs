//!
//! Defines error types for version construction and comparison.
//!
//! Nothing here is transient or recoverable: every failure is a
//! precondition violation surfaced immediately to the caller, so the
//! enclosing operation (e.g. accepting a version off the network) can
//! abort rather than proceed with a guessed ordering.

/// Errors that can occur while constructing, decoding or comparing versions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Construction or decoding produced a clock that violates its
    /// invariants (duplicate node id, malformed encoding, oversized entry
    /// list). Never silently corrected.
    #[error("Invalid clock state: {0}")]
    InvalidClockState(String),
    /// `compare` was invoked across different version representations.
    /// Cross-representation ordering is undefined and is rejected.
    #[error("Cannot compare incompatible version types")]
    IncompatibleVersionType,
}
