use proptest::prelude::*;
use quorum_core::time::vector::{compare, VectorClock};
use quorum_core::types::NodeId;
use quorum_core::version::Occurred;

// Strategy for a canonical vector clock: unique node ids via btree_map,
// small positive counters so the dominance cases stay reachable.
fn arb_clock() -> impl Strategy<Value = VectorClock> {
    (
        prop::collection::btree_map(any::<NodeId>(), 1u64..100, 0..8),
        any::<u64>(),
    )
        .prop_map(|(pairs, ts)| {
            VectorClock::from_entries(pairs, ts).expect("btree_map keys are unique")
        })
}

proptest! {
    /// compare(b, a) is the exact mirror of compare(a, b): Before/After
    /// swap, Concurrent and Equal are symmetric.
    #[test]
    fn prop_compare_antisymmetry(a in arb_clock(), b in arb_clock()) {
        prop_assert_eq!(compare(&b, &a), compare(&a, &b).inverse());
    }

    #[test]
    fn prop_compare_reflexivity(a in arb_clock()) {
        prop_assert_eq!(compare(&a, &a), Occurred::Equal);
    }

    #[test]
    fn prop_concurrency_is_symmetric(a in arb_clock(), b in arb_clock()) {
        prop_assert_eq!(
            compare(&a, &b) == Occurred::Concurrent,
            compare(&b, &a) == Occurred::Concurrent
        );
    }

    #[test]
    fn prop_merge_commutative(a in arb_clock(), b in arb_clock()) {
        let ab = a.merge(&b);
        let ba = b.merge(&a);
        prop_assert_eq!(&ab, &ba);
        prop_assert_eq!(ab.timestamp(), ba.timestamp());
    }

    #[test]
    fn prop_merge_associative(a in arb_clock(), b in arb_clock(), c in arb_clock()) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn prop_merge_idempotent(a in arb_clock()) {
        prop_assert_eq!(a.merge(&a), a);
    }

    /// The join dominates or equals both inputs, never precedes either.
    #[test]
    fn prop_merge_dominates_inputs(a in arb_clock(), b in arb_clock()) {
        let joined = a.merge(&b);
        prop_assert!(compare(&joined, &a).is_after_or_equal());
        prop_assert!(compare(&joined, &b).is_after_or_equal());
    }

    #[test]
    fn prop_increment_advances_causality(a in arb_clock(), node in any::<NodeId>()) {
        let next = a.incremented_at(node, a.timestamp());
        prop_assert_eq!(compare(&next, &a), Occurred::After);
        prop_assert_eq!(next.get(node), a.get(node) + 1);
    }

    /// A clock built with an explicit zero entry for some node equals the
    /// clock without that entry.
    #[test]
    fn prop_zero_counters_never_stored(a in arb_clock(), node in any::<NodeId>()) {
        let pairs = a.entries().iter().map(|e| (e.node, e.counter));
        let padded = if a.get(node) == 0 {
            VectorClock::from_entries(pairs.chain([(node, 0)]), a.timestamp()).unwrap()
        } else {
            VectorClock::from_entries(pairs, a.timestamp()).unwrap()
        };
        prop_assert_eq!(padded, a);
    }

    #[test]
    fn prop_wire_round_trip(a in arb_clock()) {
        let decoded = VectorClock::from_bytes(&a.to_bytes()).unwrap();
        prop_assert_eq!(&decoded, &a);
        prop_assert_eq!(decoded.timestamp(), a.timestamp());
    }

    #[test]
    fn prop_serde_round_trip(a in arb_clock()) {
        let json = serde_json::to_string(&a).unwrap();
        let decoded: VectorClock = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&decoded, &a);
        prop_assert_eq!(decoded.timestamp(), a.timestamp());
    }

    /// Arbitrary bytes must decode to an error or a valid clock, never panic.
    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = VectorClock::from_bytes(&bytes);
    }
}
