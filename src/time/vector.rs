//! Vector clock implementation.
//!
//! A [`VectorClock`] maps actor ids to event counters. A missing entry reads
//! as zero everywhere: in comparison, merge and the threshold queries.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{self, DecodeConfig};
use crate::error::DecodeError;
use crate::types::ActorId;

/// Causal relation of one clock to another.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PartialOrder {
    /// Every counter matches (missing entries count as zero).
    Equal,
    /// `self` is dominated by `other`.
    Before,
    /// `self` dominates `other`.
    After,
    /// Each clock has at least one counter ahead of the other.
    Concurrent,
}

impl PartialOrder {
    /// The same relation seen from the other clock.
    pub fn reverse(self) -> Self {
        match self {
            PartialOrder::Before => PartialOrder::After,
            PartialOrder::After => PartialOrder::Before,
            other => other,
        }
    }
}

/// Raises every entry of `local` to at least the matching entry of `incoming`.
///
/// Only raises: an incoming zero for an actor `local` lacks writes nothing,
/// since absence already reads as zero.
pub fn merge_into<A: Ord + Clone>(local: &mut BTreeMap<A, u64>, incoming: &BTreeMap<A, u64>) {
    for (actor, &incoming_count) in incoming {
        match local.get_mut(actor) {
            Some(local_count) => *local_count = (*local_count).max(incoming_count),
            None if incoming_count > 0 => {
                local.insert(actor.clone(), incoming_count);
            }
            None => {}
        }
    }
}

/// Classifies `vc1` against `vc2` over the union of their actors.
pub fn compare<A: Ord>(vc1: &BTreeMap<A, u64>, vc2: &BTreeMap<A, u64>) -> PartialOrder {
    let mut before = false;
    let mut after = false;

    // Both maps are sorted, so walk them together like a merge join.
    let mut left = vc1.iter().peekable();
    let mut right = vc2.iter().peekable();
    loop {
        let (val1, val2) = match (left.peek(), right.peek()) {
            (None, None) => break,
            (Some(&(_, &v1)), None) => {
                left.next();
                (v1, 0)
            }
            (None, Some(&(_, &v2))) => {
                right.next();
                (0, v2)
            }
            (Some(&(k1, &v1)), Some(&(k2, &v2))) => match k1.cmp(k2) {
                Ordering::Less => {
                    left.next();
                    (v1, 0)
                }
                Ordering::Greater => {
                    right.next();
                    (0, v2)
                }
                Ordering::Equal => {
                    left.next();
                    right.next();
                    (v1, v2)
                }
            },
        };

        match val1.cmp(&val2) {
            Ordering::Less => before = true,
            Ordering::Greater => after = true,
            Ordering::Equal => {}
        }
        if before && after {
            return PartialOrder::Concurrent;
        }
    }

    match (before, after) {
        (false, false) => PartialOrder::Equal,
        (true, false) => PartialOrder::Before,
        (false, true) => PartialOrder::After,
        (true, true) => PartialOrder::Concurrent,
    }
}

/// Vector clock over actor ids of type `A`.
///
/// Entries are kept in ascending actor order, so iteration, [`actors`](Self::actors),
/// the `Display` rendering and the byte encoding are all deterministic.
///
/// `PartialEq` is structural: a clock holding an explicit `{x: 0}` is not `==`
/// to an empty clock, although [`compare`](Self::compare) reports them `Equal`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "A: Serialize", deserialize = "A: Ord + Deserialize<'de>"))]
pub struct VectorClock<A> {
    entries: BTreeMap<A, u64>,
}

impl<A> Default for VectorClock<A> {
    fn default() -> Self {
        VectorClock { entries: BTreeMap::new() }
    }
}

impl<A: ActorId> VectorClock<A> {
    /// Creates an empty clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a clock produced by [`to_bytes`](Self::to_bytes), using the default limits.
    pub fn from_bytes(encoded: &[u8]) -> Result<Self, DecodeError> {
        Self::from_bytes_with(encoded, &DecodeConfig::default())
    }

    /// Decodes a clock with explicit limits.
    pub fn from_bytes_with(encoded: &[u8], config: &DecodeConfig) -> Result<Self, DecodeError> {
        let entries: BTreeMap<A, u64> = codec::decode(encoded, config)?;
        Ok(VectorClock { entries })
    }

    /// Encodes the full actor → counter mapping.
    ///
    /// Roundtrips through [`from_bytes`](Self::from_bytes) as long as the actor
    /// type serializes infallibly, as `String` and the integers do. An actor
    /// whose `Serialize` impl errors produces an empty buffer, which decoding
    /// rejects with [`DecodeError::Empty`].
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(&self.entries)
    }

    /// Counter for `actor`, zero when absent.
    pub fn get(&self, actor: &A) -> u64 {
        self.entries.get(actor).copied().unwrap_or(0)
    }

    /// Number of actors with an entry, explicit zeros included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no actor has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending actor order.
    pub fn iter(&self) -> impl Iterator<Item = (&A, &u64)> + '_ {
        self.entries.iter()
    }

    /// Records a local event for `actor`.
    pub fn tick(&mut self, actor: A) {
        let count = self.entries.entry(actor).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Overwrites the counter for `actor`. The caller is responsible for
    /// keeping counters monotonic (e.g. when restoring a checkpoint).
    pub fn set(&mut self, actor: A, value: u64) {
        self.entries.insert(actor, value);
    }

    /// Joins `other` into this clock, taking the per-actor maximum.
    pub fn merge(&mut self, other: &VectorClock<A>) {
        merge_into(&mut self.entries, &other.entries);
        tracing::trace!(incoming = other.len(), actors = self.len(), "merged vector clock");
    }

    /// Counts silent rounds per actor between two snapshots of a peer's clock.
    ///
    /// For every actor in `now`: when `before` holds the same counter, nothing
    /// happened for that actor and its passive count here goes up by one.
    /// Otherwise the actor advanced (or is new) and its passive count restarts
    /// at one. Actors missing from `now` are left alone.
    pub fn passive_increment(&mut self, before: &VectorClock<A>, now: &VectorClock<A>) {
        let mut unchanged = 0usize;
        for (actor, now_count) in &now.entries {
            let silent = before.entries.get(actor) == Some(now_count);
            match self.entries.get_mut(actor) {
                Some(count) if silent => *count = count.saturating_add(1),
                Some(count) => *count = 1,
                None => {
                    self.entries.insert(actor.clone(), 1);
                }
            }
            if silent {
                unchanged += 1;
            }
        }
        tracing::trace!(observed = now.len(), unchanged, "passive increment");
    }

    /// Causal relation of this clock to `other`.
    pub fn compare(&self, other: &VectorClock<A>) -> PartialOrder {
        compare(&self.entries, &other.entries)
    }

    /// Shorthand for `compare(other) == PartialOrder::Before`.
    pub fn happened_before(&self, other: &VectorClock<A>) -> bool {
        self.compare(other) == PartialOrder::Before
    }

    /// Shorthand for `compare(other) == PartialOrder::After`.
    pub fn happened_after(&self, other: &VectorClock<A>) -> bool {
        self.compare(other) == PartialOrder::After
    }

    /// Shorthand for `compare(other) == PartialOrder::Concurrent`.
    pub fn is_concurrent(&self, other: &VectorClock<A>) -> bool {
        self.compare(other) == PartialOrder::Concurrent
    }

    /// [`compare`](Self::compare) as a std `Ordering`, `None` when concurrent.
    ///
    /// Not exposed through `PartialOrd` because `==` is structural and an
    /// explicit zero entry compares `Equal` here without being `==`.
    pub fn causal_cmp(&self, other: &VectorClock<A>) -> Option<Ordering> {
        match self.compare(other) {
            PartialOrder::Equal => Some(Ordering::Equal),
            PartialOrder::Before => Some(Ordering::Less),
            PartialOrder::After => Some(Ordering::Greater),
            PartialOrder::Concurrent => None,
        }
    }

    /// All actors with an entry, ascending.
    pub fn actors(&self) -> Vec<A> {
        self.entries.keys().cloned().collect()
    }

    /// Actors whose counter is strictly greater than `threshold`, ascending.
    pub fn above(&self, threshold: u64) -> Vec<A> {
        self.select(|count| count > threshold)
    }

    /// Actors whose counter is strictly less than `threshold`, ascending.
    pub fn below(&self, threshold: u64) -> Vec<A> {
        self.select(|count| count < threshold)
    }

    fn select(&self, keep: impl Fn(u64) -> bool) -> Vec<A> {
        self.entries
            .iter()
            .filter(|&(_, &count)| keep(count))
            .map(|(actor, _)| actor.clone())
            .collect()
    }
}

impl<A: ActorId> FromIterator<(A, u64)> for VectorClock<A> {
    fn from_iter<I: IntoIterator<Item = (A, u64)>>(iter: I) -> Self {
        VectorClock { entries: iter.into_iter().collect() }
    }
}

impl<A: ActorId> Extend<(A, u64)> for VectorClock<A> {
    fn extend<I: IntoIterator<Item = (A, u64)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Renders the clock as a JSON object, e.g. `{"1":1,"2":4}`. Actor types that
/// JSON cannot use as keys fall back to a debug map.
impl<A: ActorId> fmt::Display for VectorClock<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.entries) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.debug_map().entries(self.entries.iter()).finish(),
        }
    }
}
