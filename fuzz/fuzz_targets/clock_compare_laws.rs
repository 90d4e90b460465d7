#![no_main]

// Harness: clock_compare_laws - comparison symmetry and merge lattice laws
// over structured clock inputs.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quorum_core::time::vector::{compare, VectorClock};
use quorum_core::version::Occurred;

#[derive(Arbitrary, Debug)]
struct TwoClocks {
    a: Vec<(i16, u64)>,
    b: Vec<(i16, u64)>,
}

fuzz_target!(|input: TwoClocks| {
    // Duplicate node ids are a rejected precondition, not a law violation.
    let (Ok(a), Ok(b)) = (
        VectorClock::from_entries(input.a, 0),
        VectorClock::from_entries(input.b, 0),
    ) else {
        return;
    };

    let forward = compare(&a, &b);
    assert_eq!(compare(&b, &a), forward.inverse());
    assert_eq!(forward == Occurred::Equal, a == b);

    let joined = a.merge(&b);
    assert_eq!(joined, b.merge(&a));
    assert_eq!(joined.merge(&joined), joined);
    assert!(compare(&joined, &a).is_after_or_equal());
    assert!(compare(&joined, &b).is_after_or_equal());
});
