//! proptest strategies for clocks, shared by the unit tests, the integration
//! tests and downstream crates that enable the `test-utils` feature.

use proptest::collection::btree_map;
use proptest::prelude::*;

use crate::time::VectorClock;

/// Clock over a small numeric actor space so that generated clocks overlap.
pub fn arb_numeric_clock() -> impl Strategy<Value = VectorClock<u64>> {
    btree_map(0u64..8, 0u64..6, 0..8).prop_map(|m| m.into_iter().collect())
}

/// Clock with arbitrary string actors and full-range counters.
pub fn arb_string_clock() -> impl Strategy<Value = VectorClock<String>> {
    btree_map("[a-z0-9]{0,6}", any::<u64>(), 0..32).prop_map(|m| m.into_iter().collect())
}
