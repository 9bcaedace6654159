//! Claimed-location set for traversal deduplication

use std::collections::HashSet;
use std::sync::Mutex;
use url::Url;

/// Concurrency-safe set of locations already claimed by a traversal run
///
/// A location must be claimed before any fetch attempt for it begins. The
/// claim is a single atomic test-and-insert: under concurrent claims for the
/// same location, exactly one caller observes "not yet claimed". The set is
/// append-only for the lifetime of a run; the engine clears it only between
/// runs.
#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: Mutex<HashSet<Url>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to claim a location
    ///
    /// Returns `true` if the location was not yet claimed (the caller now
    /// owns the fetch for it), `false` if some earlier caller already
    /// claimed it.
    pub fn try_claim(&self, location: &Url) -> bool {
        let mut claimed = self.claimed.lock().unwrap();
        claimed.insert(location.clone())
    }

    /// Number of locations claimed so far
    pub fn len(&self) -> usize {
        self.claimed.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.lock().unwrap().is_empty()
    }

    /// Forgets all claims; called by the engine at the start of a new run
    pub fn clear(&self) {
        self.claimed.lock().unwrap().clear();
    }
}
