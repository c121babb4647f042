//! Query cache primitives.
//!
//! The cache keeps one entry per collection query. Entries are considered
//! fresh for a fixed window after they were fetched; a write to a collection
//! invalidates exactly that collection's query key and nothing else.

mod clock;
mod events;
mod freshness;
mod keys;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::CacheEvent;
pub use freshness::{Freshness, DEFAULT_FRESHNESS_WINDOW};
pub use keys::QueryKey;
