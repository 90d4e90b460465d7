//!
//! The polymorphic version boundary.
//!
//! Storage and client logic hold versions behind the [`Version`] capability
//! and only ever compare or clone them; the concrete representation stays
//! private to whichever implementation produced it.

use std::any::Any;
use std::fmt;

use crate::error::VersionError;
use crate::time::vector::VectorClock;

/// Outcome of comparing two versions of the same logical item.
///
/// Consumed by storage and client logic to decide write acceptance,
/// read-repair and conflict surfacing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Occurred {
    /// This version happened before the other; the other dominates.
    Before,
    /// This version happened after the other; this one dominates.
    After,
    /// Neither version dominates the other. A genuine conflict.
    Concurrent,
    /// Identical causal histories: the same logical version.
    Equal,
}

impl Occurred {
    /// True for `Before` and `Equal`: the folded BEFORE-or-equal reading.
    pub fn is_before_or_equal(self) -> bool {
        matches!(self, Occurred::Before | Occurred::Equal)
    }

    /// True for `After` and `Equal`: the folded AFTER-or-equal reading.
    pub fn is_after_or_equal(self) -> bool {
        matches!(self, Occurred::After | Occurred::Equal)
    }

    /// The same comparison seen from the other operand's side.
    pub fn inverse(self) -> Occurred {
        match self {
            Occurred::Before => Occurred::After,
            Occurred::After => Occurred::Before,
            Occurred::Concurrent => Occurred::Concurrent,
            Occurred::Equal => Occurred::Equal,
        }
    }
}

/// Capability contract for version descriptors held polymorphically.
///
/// Holders must restrict themselves to these two operations and never
/// assume the concrete representation behind the trait object.
pub trait Version: fmt::Debug + Send + Sync {
    /// Compares this version against another of the same representation.
    ///
    /// # Errors
    /// [`VersionError::IncompatibleVersionType`] if `other` is a different
    /// representation. Ordering across representations is undefined and is
    /// rejected, never coerced.
    fn compare(&self, other: &dyn Version) -> Result<Occurred, VersionError>;

    /// Allocates an owned, independent duplicate of this version.
    fn boxed_clone(&self) -> Box<dyn Version>;

    /// Narrowing hook used by concrete `compare` implementations.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Version> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// A value paired with the vector clock that versions it.
///
/// This is the shape consumers of a comparison verdict hold. What to do
/// with a conflicting pair is left to the resolution policy above us.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Versioned<T> {
    value: T,
    version: VectorClock,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: VectorClock) -> Versioned<T> {
        Versioned { value, version }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn version(&self) -> &VectorClock {
        &self.version
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Causal relationship between this value's version and another's.
    pub fn happened(&self, other: &Versioned<T>) -> Occurred {
        crate::time::vector::compare(&self.version, &other.version)
    }
}
