//! Logical-time utilities.
//!
//! Vector clocks live in `time::vector`; the common items are re-exported here.

pub mod vector;

pub use vector::{PartialOrder, VectorClock};
