//! Sparse vector clock for detecting causal relationships between replicas.
//!
//! A clock stores one counter per node that has mastered a write to the
//! item. In general writes are mastered by a single node, so the vector is
//! kept sparse: absent nodes are implicitly at zero and zero counters are
//! never stored. Entries are held sorted by node id ascending, which lets
//! comparison and merge walk both entry lists in a single pass.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::VersionError;
use crate::types::{NodeId, MAX_CLOCK_ENTRIES};
use crate::version::{Occurred, Version};

use super::wall_clock_millis;

/// A single (node, counter) pair of a sparse vector clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ClockEntry {
    /// The node that mastered the writes this entry counts.
    pub node: NodeId,
    /// Number of writes mastered by `node`; always greater than zero.
    pub counter: u64,
}

/// Bytes per serialized entry: 16-bit node id + 64-bit counter.
const WIRE_ENTRY_WIDTH: usize = 2 + 8;

/// Bytes outside the entry table: 16-bit entry count + 64-bit timestamp.
const WIRE_OVERHEAD: usize = 2 + 8;

/// A vector of the number of writes mastered by each node.
///
/// The timestamp records the wall-clock time of the last local update and
/// is advisory only: it never participates in ordering, equality or
/// hashing. A clock is an owned value; `Clone` is a deep copy, shared
/// references are safe for concurrent reads, and every operation that
/// produces a new logical version returns a fresh instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ClockRepr")]
pub struct VectorClock {
    /// Sorted by node ascending, unique per node, counters strictly positive.
    entries: Vec<ClockEntry>,
    timestamp: u64,
}

/// Raw mirror of [`VectorClock`] that serde deserializes into; converting
/// it re-canonicalizes, so serde input cannot bypass the clock invariants.
#[derive(serde::Deserialize)]
struct ClockRepr {
    entries: Vec<ClockEntry>,
    timestamp: u64,
}

impl TryFrom<ClockRepr> for VectorClock {
    type Error = VersionError;

    fn try_from(repr: ClockRepr) -> Result<Self, Self::Error> {
        VectorClock::from_entries(
            repr.entries.into_iter().map(|e| (e.node, e.counter)),
            repr.timestamp,
        )
    }
}

impl VectorClock {
    /// Constructs an empty clock stamped with the current wall-clock time.
    pub fn new() -> VectorClock {
        VectorClock::with_timestamp(wall_clock_millis())
    }

    /// Constructs an empty clock with a caller-supplied timestamp.
    pub fn with_timestamp(timestamp: u64) -> VectorClock {
        VectorClock {
            entries: Vec::new(),
            timestamp,
        }
    }

    /// Constructs a clock from explicit (node, counter) pairs.
    ///
    /// The input is copied and canonicalized: sorted by node id, with
    /// zero-counter pairs dropped (implicit zero for absent nodes).
    ///
    /// # Errors
    /// [`VersionError::InvalidClockState`] if the same node id appears
    /// more than once with a non-zero counter, or if more distinct nodes
    /// remain than the wire form can describe.
    pub fn from_entries<I>(pairs: I, timestamp: u64) -> Result<VectorClock, VersionError>
    where
        I: IntoIterator<Item = (NodeId, u64)>,
    {
        let mut entries: Vec<ClockEntry> = pairs
            .into_iter()
            .filter(|(_, counter)| *counter > 0)
            .map(|(node, counter)| ClockEntry { node, counter })
            .collect();
        entries.sort_by_key(|e| e.node);

        for pair in entries.windows(2) {
            if pair[0].node == pair[1].node {
                return Err(VersionError::InvalidClockState(format!(
                    "duplicate entry for node {}",
                    pair[0].node
                )));
            }
        }
        if entries.len() > MAX_CLOCK_ENTRIES {
            return Err(VersionError::InvalidClockState(format!(
                "{} entries exceed the {} node limit",
                entries.len(),
                MAX_CLOCK_ENTRIES
            )));
        }

        Ok(VectorClock { entries, timestamp })
    }

    /// Read-only view of the entries, node-ascending.
    ///
    /// Valid only while the owning clock is alive; callers that need to
    /// keep the data must clone the clock.
    pub fn entries(&self) -> &[ClockEntry] {
        &self.entries
    }

    /// The advisory wall-clock time of the last local update.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Counter for `node`, zero if the node has mastered no writes.
    pub fn get(&self, node: NodeId) -> u64 {
        match self.entries.binary_search_by_key(&node, |e| e.node) {
            Ok(i) => self.entries[i].counter,
            Err(_) => 0,
        }
    }

    /// Number of nodes with a non-zero counter.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no node has mastered a write yet (the all-zero clock).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Joins two clocks: pointwise maximum of the counters, maximum of the
    /// timestamps. Neither input is touched.
    ///
    /// This is the join of the dominance lattice: commutative, associative
    /// and idempotent, and the result dominates or equals both inputs.
    #[must_use]
    pub fn merge(&self, other: &VectorClock) -> VectorClock {
        let (a, b) = (&self.entries, &other.entries);
        let mut merged = Vec::with_capacity(a.len().max(b.len()));
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].node.cmp(&b[j].node) {
                Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(ClockEntry {
                        node: a[i].node,
                        counter: a[i].counter.max(b[j].counter),
                    });
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);

        VectorClock {
            entries: merged,
            timestamp: self.timestamp.max(other.timestamp),
        }
    }

    /// Successor clock after a write mastered by `node`, stamped with the
    /// current wall-clock time. The original is untouched.
    #[must_use]
    pub fn incremented(&self, node: NodeId) -> VectorClock {
        self.incremented_at(node, wall_clock_millis())
    }

    /// Successor clock after a write mastered by `node`, with an explicit
    /// timestamp (coordinators stamping a write, deterministic tests).
    ///
    /// The counter for `node` advances by one, starting at 1 if absent;
    /// all other entries are unchanged. A u64 counter cannot overflow in
    /// any realistic deployment, so the addition saturates rather than
    /// carrying an error path nothing can hit.
    #[must_use]
    pub fn incremented_at(&self, node: NodeId, timestamp: u64) -> VectorClock {
        let mut entries = self.entries.clone();
        match entries.binary_search_by_key(&node, |e| e.node) {
            Ok(i) => entries[i].counter = entries[i].counter.saturating_add(1),
            Err(i) => entries.insert(i, ClockEntry { node, counter: 1 }),
        }
        VectorClock { entries, timestamp }
    }

    /// Serializes to the wire form shared with the transport layer:
    /// big-endian u16 entry count, then per entry a 16-bit node id and a
    /// 64-bit counter, then the 64-bit timestamp. Deterministic because
    /// entries are canonically ordered.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.entries.len() * WIRE_ENTRY_WIDTH + WIRE_OVERHEAD);
        buf.extend_from_slice(&(self.entries.len() as u16).to_be_bytes());
        for entry in &self.entries {
            buf.extend_from_slice(&entry.node.to_be_bytes());
            buf.extend_from_slice(&entry.counter.to_be_bytes());
        }
        buf.extend_from_slice(&self.timestamp.to_be_bytes());
        buf
    }

    /// Decodes the wire form produced by [`to_bytes`](VectorClock::to_bytes).
    ///
    /// The wire form is canonical, so ordering, uniqueness and the
    /// sparse-zero invariant are validated rather than repaired: a zero
    /// counter or an out-of-order entry means the bytes were not produced
    /// by a conforming encoder.
    ///
    /// # Errors
    /// [`VersionError::InvalidClockState`] describing the first violation.
    pub fn from_bytes(bytes: &[u8]) -> Result<VectorClock, VersionError> {
        if bytes.len() < WIRE_OVERHEAD {
            return Err(VersionError::InvalidClockState(format!(
                "clock encoding of {} bytes is shorter than the fixed overhead",
                bytes.len()
            )));
        }
        let count = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        if count > MAX_CLOCK_ENTRIES {
            return Err(VersionError::InvalidClockState(format!(
                "entry count {} exceeds the {} node limit",
                count, MAX_CLOCK_ENTRIES
            )));
        }
        let expected = count * WIRE_ENTRY_WIDTH + WIRE_OVERHEAD;
        if bytes.len() != expected {
            return Err(VersionError::InvalidClockState(format!(
                "clock encoding is {} bytes, expected {} for {} entries",
                bytes.len(),
                expected,
                count
            )));
        }

        let mut entries: Vec<ClockEntry> = Vec::with_capacity(count);
        let mut offset = 2;
        for _ in 0..count {
            let node = i16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
            let mut counter_bytes = [0u8; 8];
            counter_bytes.copy_from_slice(&bytes[offset + 2..offset + WIRE_ENTRY_WIDTH]);
            let counter = u64::from_be_bytes(counter_bytes);

            if counter == 0 {
                return Err(VersionError::InvalidClockState(format!(
                    "zero counter stored for node {node}"
                )));
            }
            if let Some(prev) = entries.last() {
                if prev.node >= node {
                    return Err(VersionError::InvalidClockState(format!(
                        "entry for node {} out of order after node {}",
                        node, prev.node
                    )));
                }
            }
            entries.push(ClockEntry { node, counter });
            offset += WIRE_ENTRY_WIDTH;
        }

        let mut ts_bytes = [0u8; 8];
        ts_bytes.copy_from_slice(&bytes[offset..offset + 8]);
        Ok(VectorClock {
            entries,
            timestamp: u64::from_be_bytes(ts_bytes),
        })
    }
}

impl Default for VectorClock {
    fn default() -> Self {
        VectorClock::new()
    }
}

/// Compares two vector clocks.
///
/// Walks the union of node ids present in either clock (both entry lists
/// are sorted, so a single merge-style pass suffices) and tracks whether
/// each side holds a counter strictly greater than the other's anywhere.
/// An entry present on only one side counts as greater there, since stored
/// counters are always positive.
///
/// The outcomes: `After` if only `v1` holds a greater counter, `Before` if
/// only `v2` does, `Concurrent` if both do, and `Equal` if neither does.
/// `compare(a, b)` is always the [`inverse`](Occurred::inverse) of
/// `compare(b, a)`.
pub fn compare(v1: &VectorClock, v2: &VectorClock) -> Occurred {
    let (a, b) = (&v1.entries, &v2.entries);
    let mut v1_greater = false;
    let mut v2_greater = false;

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].node.cmp(&b[j].node) {
            Ordering::Less => {
                v1_greater = true;
                i += 1;
            }
            Ordering::Greater => {
                v2_greater = true;
                j += 1;
            }
            Ordering::Equal => {
                match a[i].counter.cmp(&b[j].counter) {
                    Ordering::Less => v2_greater = true,
                    Ordering::Greater => v1_greater = true,
                    Ordering::Equal => {}
                }
                i += 1;
                j += 1;
            }
        }
    }
    if i < a.len() {
        v1_greater = true;
    }
    if j < b.len() {
        v2_greater = true;
    }

    match (v1_greater, v2_greater) {
        (true, true) => Occurred::Concurrent,
        (true, false) => Occurred::After,
        (false, true) => Occurred::Before,
        (false, false) => Occurred::Equal,
    }
}

impl Version for VectorClock {
    fn compare(&self, other: &dyn Version) -> Result<Occurred, VersionError> {
        let other = other
            .as_any()
            .downcast_ref::<VectorClock>()
            .ok_or(VersionError::IncompatibleVersionType)?;
        let verdict = compare(self, other);
        tracing::trace!(?verdict, "compared vector clocks");
        Ok(verdict)
    }

    fn boxed_clone(&self) -> Box<dyn Version> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Timestamp is advisory and excluded from equality and hashing: two clocks
// are the same logical version iff their canonical entries match.
impl PartialEq for VectorClock {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for VectorClock {}

impl Hash for VectorClock {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "version(")?;
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", entry.node, entry.counter)?;
        }
        write!(f, ") ts:{}", self.timestamp)
    }
}
