//! Traversal lifecycle observers

use crate::crawler::CrawlResult;
use url::Url;

/// Subscription interface for traversal lifecycle events
///
/// Observers are registered at crawler construction and invoked
/// synchronously at the point of the event, on whichever task produced it:
/// a handler that blocks indefinitely stalls that task. For every location,
/// `on_discovered` happens before the matching `on_crawled`; no ordering is
/// guaranteed between events of unrelated locations.
///
/// Handlers must not call [`Crawler::crawl`](crate::Crawler::crawl) on the
/// engine instance that invoked them.
pub trait CrawlObserver: Send + Sync {
    /// A location was claimed and entered into the traversal
    fn on_discovered(&self, location: &Url) {
        let _ = location;
    }

    /// A location reached a terminal state
    ///
    /// `resource` is `Some` only for a successful network fetch; cache hits,
    /// redirect hops, and failures report `None`.
    fn on_crawled(&self, resource: Option<&CrawlResult>) {
        let _ = resource;
    }
}
