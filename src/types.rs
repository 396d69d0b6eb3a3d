// Shared types that the clock and the codec both need.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::time::VectorClock;

/// Bound for anything usable as an actor identifier.
///
/// Actors must be totally ordered (entries are kept sorted by actor), cloneable
/// (entries are created on first reference from a borrowed id) and serde-capable
/// so the clock can be encoded. `String` and the unsigned integers are the usual
/// choices. String ids sort lexicographically, so `"10"` comes before `"2"`.
///
/// Serialization must not fail: [`VectorClock::to_bytes`] has no error path
/// and yields an empty, undecodable buffer for an actor that refuses to serialize.
pub trait ActorId: Ord + Clone + Debug + Serialize + DeserializeOwned {}

impl<T> ActorId for T where T: Ord + Clone + Debug + Serialize + DeserializeOwned {}

/// Clock keyed by string actor ids (node names, addresses).
pub type StringClock = VectorClock<String>;

/// Clock keyed by numeric actor ids.
pub type NumericClock = VectorClock<u64>;
