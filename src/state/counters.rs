//! Live traversal counters
//!
//! Counters are incremented by many concurrent tasks and read at any time by
//! progress observers, so every update is a `SeqCst` atomic operation: an
//! observer that runs after the callback for a given event always sees that
//! event's increment applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counters for one traversal run
#[derive(Debug, Default)]
pub struct TraversalCounters {
    discovered: AtomicU64,
    finished: AtomicU64,
    errors: AtomicU64,
    externally_resolved: AtomicU64,
}

/// Point-in-time copy of the traversal counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Locations claimed and entered into the traversal
    pub discovered: u64,
    /// Locations that reached a terminal state (success, cache hit,
    /// redirect hop, or error)
    pub finished: u64,
    /// Locations whose fetch failed
    pub errors: u64,
    /// Locations short-circuited by the cache override hook
    pub externally_resolved: u64,
}

impl TraversalCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_discovered(&self) {
        self.discovered.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_finished(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_externally_resolved(&self) {
        self.externally_resolved.fetch_add(1, Ordering::SeqCst);
    }

    /// Reads all four counters; values are individually current as of the
    /// moment each is loaded
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            discovered: self.discovered.load(Ordering::SeqCst),
            finished: self.finished.load(Ordering::SeqCst),
            errors: self.errors.load(Ordering::SeqCst),
            externally_resolved: self.externally_resolved.load(Ordering::SeqCst),
        }
    }

    /// Zeroes all counters; called by the engine at the start of a new run
    pub fn reset(&self) {
        self.discovered.store(0, Ordering::SeqCst);
        self.finished.store(0, Ordering::SeqCst);
        self.errors.store(0, Ordering::SeqCst);
        self.externally_resolved.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fresh_counters_are_zero() {
        let counters = TraversalCounters::new();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }

    #[test]
    fn test_increments_are_visible_in_snapshot() {
        let counters = TraversalCounters::new();
        counters.record_discovered();
        counters.record_discovered();
        counters.record_finished();
        counters.record_error();
        counters.record_externally_resolved();

        let snap = counters.snapshot();
        assert_eq!(snap.discovered, 2);
        assert_eq!(snap.finished, 1);
        assert_eq!(snap.errors, 1);
        assert_eq!(snap.externally_resolved, 1);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let counters = TraversalCounters::new();
        counters.record_discovered();
        counters.record_finished();
        counters.reset();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counters = Arc::new(TraversalCounters::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counters = Arc::clone(&counters);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        counters.record_discovered();
                        counters.record_finished();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = counters.snapshot();
        assert_eq!(snap.discovered, 8000);
        assert_eq!(snap.finished, 8000);
    }
}
