#![no_main]

// Harness: clock_decode - wire robustness.
// Arbitrary bytes must decode to an error or a clock that re-encodes to
// the exact same bytes (the wire form is canonical).

use libfuzzer_sys::fuzz_target;
use quorum_core::time::vector::VectorClock;

fuzz_target!(|data: &[u8]| {
    if let Ok(clock) = VectorClock::from_bytes(data) {
        assert_eq!(clock.to_bytes(), data);
    }
});
