#![forbid(unsafe_code)]
#![deny(clippy::all)]

//!
//! Quorum-Core is the causal versioning core for a distributed,
//! multi-master key-value store.
//!
//! It provides the vector clock used to decide, without coordination,
//! whether one version of a value supersedes another or whether the two
//! are genuinely conflicting writes that must be reconciled. Transport,
//! storage and conflict-resolution policy live in sibling crates; this
//! crate is pure computation.

// Module for shared scalar types (NodeId, entry bounds).
pub mod types;

// Module for version error types.
pub mod error;

// Module for the polymorphic version boundary (Occurred, Version, Versioned).
pub mod version;

// Module for logical-time primitives (the vector clock itself).
pub mod time;

// Re-export the core surface for easier access at the crate root.
pub use error::VersionError;
pub use time::vector::{compare, ClockEntry, VectorClock};
pub use types::NodeId;
pub use version::{Occurred, Version, Versioned};
