//! Shared state for a traversal run
//!
//! This module provides the two structures mutated concurrently by the
//! traversal tasks:
//!
//! - `VisitedSet`: claims target locations so each is fetched at most once
//! - `TraversalCounters`: live atomic counters read by progress observers

mod counters;
mod visited;

// Re-export main types
pub use counters::{CounterSnapshot, TraversalCounters};
pub use visited::VisitedSet;
