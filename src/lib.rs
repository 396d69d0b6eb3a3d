#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! vclock provides vector clocks: per-actor event counters that let distributed
//! nodes order events causally without a shared clock.
//!
//! ```
//! use vclock::{PartialOrder, StringClock};
//!
//! let mut a = StringClock::new();
//! a.tick("node-a".to_string());
//!
//! let mut b = a.clone();
//! b.tick("node-b".to_string());
//!
//! assert_eq!(a.compare(&b), PartialOrder::Before);
//! assert_eq!(StringClock::from_bytes(&b.to_bytes()).unwrap(), b);
//! ```

// Module for logical-time primitives (VectorClock, PartialOrder).
pub mod time;

pub use time::{PartialOrder, VectorClock};

// Module for the byte envelope used by to_bytes/from_bytes.
pub mod codec;

pub use codec::DecodeConfig;

// Module for shared types (ActorId bound, clock aliases).
pub mod types;

pub use types::{ActorId, NumericClock, StringClock};

// Module for error types.
pub mod error;

pub use error::DecodeError;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
