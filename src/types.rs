//!
//! Shared scalar types for the versioning core.
//!
//! Node identifiers are assigned by cluster topology and arrive here as
//! opaque small integers; this crate accepts them as-is and never manages
//! their lifecycle.

/// Identifier of a node (replica) in the cluster.
///
/// Kept at 16 bits for interoperability with stored and transmitted clocks.
pub type NodeId = i16;

/// Upper bound on the number of entries a clock may carry, matching the
/// number of distinct node ids the wire form can describe.
pub const MAX_CLOCK_ENTRIES: usize = i16::MAX as usize;
