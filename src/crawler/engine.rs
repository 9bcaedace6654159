//! Traversal engine - recursive fetch-discover-fetch orchestration
//!
//! The engine claims each target location in the visited set, consults the
//! optional cache override hook, fetches over the host's shared client,
//! classifies the payload, extracts embedded references from text-like
//! content, and recurses into every reference concurrently with one less
//! unit of depth budget. Results merge self-first, children in discovery
//! order, each child's subtree flattened depth-first.

use crate::cache::CacheOverride;
use crate::crawler::classify::is_text_like;
use crate::crawler::client::{fetch, ClientRegistry, FetchOutcome};
use crate::crawler::extract::extract_references;
use crate::crawler::observer::CrawlObserver;
use crate::crawler::{CrawlOptions, CrawlResult};
use crate::state::{CounterSnapshot, TraversalCounters, VisitedSet};
use crate::CrawlError;
use futures::future::{join_all, BoxFuture};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

struct Inner {
    options: CrawlOptions,
    clients: ClientRegistry,
    visited: VisitedSet,
    counters: TraversalCounters,
    observers: Vec<Arc<dyn CrawlObserver>>,
    cache: Option<Arc<dyn CacheOverride>>,
    crawling: AtomicBool,
}

/// The traversal engine
///
/// Cheap to clone; clones share the same run state, so only one crawl may be
/// in progress across all clones of an instance at a time.
#[derive(Clone)]
pub struct Crawler {
    inner: Arc<Inner>,
}

/// Configures and builds a [`Crawler`]
///
/// The observer set and the cache capability are fixed at build time; a
/// crawler built without a cache hook performs a network fetch for every
/// claimed location.
pub struct CrawlerBuilder {
    options: CrawlOptions,
    observers: Vec<Arc<dyn CrawlObserver>>,
    cache: Option<Arc<dyn CacheOverride>>,
}

impl CrawlerBuilder {
    /// Registers an observer for traversal lifecycle events
    pub fn subscribe(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Installs the cache override hook consulted before every network fetch
    pub fn cache(mut self, cache: Arc<dyn CacheOverride>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Crawler {
        let clients = ClientRegistry::new(self.options.timeout);
        Crawler {
            inner: Arc::new(Inner {
                options: self.options,
                clients,
                visited: VisitedSet::new(),
                counters: TraversalCounters::new(),
                observers: self.observers,
                cache: self.cache,
                crawling: AtomicBool::new(false),
            }),
        }
    }
}

impl Crawler {
    pub fn builder(options: CrawlOptions) -> CrawlerBuilder {
        CrawlerBuilder {
            options,
            observers: Vec::new(),
            cache: None,
        }
    }

    /// Current counter values; readable at any time, including mid-run
    pub fn counters(&self) -> CounterSnapshot {
        self.inner.counters.snapshot()
    }

    /// Runs one traversal from `entry` with the given depth budget
    ///
    /// `depth` must be at least 1; a depth of 1 fetches the entry location
    /// only, without reference discovery. With `force_discover`, every
    /// fetched resource is searched for references regardless of
    /// classification. Only one crawl may run per instance at a time; a
    /// concurrent second call fails with [`CrawlError::AlreadyCrawling`]
    /// before any network activity.
    ///
    /// A completed run returns every resource successfully obtained, however
    /// many branches failed; per-branch fetch failures are reflected only in
    /// the counters.
    pub async fn crawl(
        &self,
        entry: &str,
        force_discover: bool,
        depth: u32,
    ) -> Result<Vec<CrawlResult>, CrawlError> {
        if depth == 0 {
            return Err(CrawlError::DepthZero);
        }
        let entry = Url::parse(entry)?;
        if self
            .inner
            .crawling
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CrawlError::AlreadyCrawling);
        }

        self.inner.counters.reset();
        self.inner.visited.clear();
        tracing::info!("Starting crawl at {} with depth {}", entry, depth);

        let outcome = self.clone().visit(entry, depth, force_discover).await;
        self.inner.crawling.store(false, Ordering::SeqCst);
        outcome
    }

    /// Visits one location: claim, discover, resolve, recurse
    ///
    /// Boxed because the future recurses through `follow_references`.
    fn visit(
        self,
        target: Url,
        depth: u32,
        force_discover: bool,
    ) -> BoxFuture<'static, Result<Vec<CrawlResult>, CrawlError>> {
        Box::pin(async move {
            if !self.inner.visited.try_claim(&target) {
                return Ok(Vec::new());
            }
            self.inner.counters.record_discovered();
            tracing::debug!("Discovered {}", target);
            self.notify_discovered(&target);

            if let Some(cache) = &self.inner.cache {
                let lookup = cache.lookup(&target);
                if lookup.skip {
                    self.inner.counters.record_finished();
                    self.inner.counters.record_externally_resolved();
                    tracing::info!("Using cached copy of {}", target);
                    self.notify_crawled(None);
                    if depth == 1 {
                        return Ok(Vec::new());
                    }
                    let Some(content) = lookup.content else {
                        return Ok(Vec::new());
                    };
                    if !force_discover && lookup.is_text != Some(true) {
                        return Ok(Vec::new());
                    }
                    return self
                        .follow_references(&content, &target, depth, force_discover)
                        .await;
                }
            }

            let client = match target
                .host_str()
                .ok_or_else(|| format!("no host in {}", target))
                .and_then(|host| {
                    self.inner
                        .clients
                        .get_or_create(host)
                        .map_err(|e| e.to_string())
                }) {
                Ok(client) => client,
                Err(reason) => return Ok(self.absorb_failure(&target, &reason)),
            };

            match fetch(&client, &target).await {
                FetchOutcome::Success { data, media_type } => {
                    tracing::info!("Fetched {}", target);
                    let resource = CrawlResult {
                        location: target.clone(),
                        data,
                        media_type,
                    };
                    self.inner.counters.record_finished();
                    self.notify_crawled(Some(&resource));

                    if depth == 1 {
                        return Ok(vec![resource]);
                    }
                    if !force_discover
                        && !is_text_like(
                            resource.media_type.as_deref(),
                            &target,
                            &self.inner.options.text_extensions,
                        )
                    {
                        return Ok(vec![resource]);
                    }

                    let text = String::from_utf8_lossy(&resource.data).into_owned();
                    let mut results = vec![resource];
                    results.extend(
                        self.follow_references(&text, &target, depth, force_discover)
                            .await?,
                    );
                    Ok(results)
                }

                FetchOutcome::Redirect { status, target: hop }
                    if self.inner.options.follow_redirect =>
                {
                    let next = hop
                        .as_deref()
                        .and_then(|raw| target.join(raw).ok())
                        .ok_or(CrawlError::RedirectMissingLocation {
                            status,
                            location: target.clone(),
                        })?;
                    tracing::info!("Code {} at {} redirected to {}", status, target, next);
                    self.inner.counters.record_finished();
                    self.notify_crawled(None);
                    // Same depth budget; the hop is transparent. The target
                    // still passes through the claim step above, so redirect
                    // cycles and targets already reached directly contribute
                    // nothing.
                    self.clone().visit(next, depth, force_discover).await
                }

                FetchOutcome::Redirect { status, .. } => {
                    Ok(self.absorb_failure(&target, &format!("HTTP {}", status)))
                }

                FetchOutcome::Failed { reason } => Ok(self.absorb_failure(&target, &reason)),
            }
        })
    }

    /// Extracts references from `content` and traverses each concurrently
    ///
    /// Children are spawned onto the runtime and awaited in discovery order,
    /// so the flattened result preserves the order references were found. A
    /// failing sibling never cancels the others: fatal child errors are
    /// surfaced only after every child has been awaited.
    async fn follow_references(
        &self,
        content: &str,
        origin: &Url,
        depth: u32,
        force_discover: bool,
    ) -> Result<Vec<CrawlResult>, CrawlError> {
        let mut children = Vec::new();
        for raw in extract_references(content) {
            match origin.join(raw) {
                Ok(next) => {
                    children.push(tokio::spawn(self.clone().visit(
                        next,
                        depth - 1,
                        force_discover,
                    )));
                }
                Err(e) => {
                    tracing::debug!("Skipping unresolvable reference {:?} on {}: {}", raw, origin, e);
                }
            }
        }

        let mut results = Vec::new();
        let mut first_error = None;
        for joined in join_all(children).await {
            match joined.map_err(CrawlError::from).and_then(|inner| inner) {
                Ok(resources) => results.extend(resources),
                Err(e) => first_error = first_error.or(Some(e)),
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(results),
        }
    }

    /// Terminal failure handling for one branch: counted, reported, absorbed
    fn absorb_failure(&self, target: &Url, reason: &str) -> Vec<CrawlResult> {
        tracing::warn!("Failed to crawl {}: {}", target, reason);
        self.inner.counters.record_error();
        self.inner.counters.record_finished();
        self.notify_crawled(None);
        Vec::new()
    }

    fn notify_discovered(&self, location: &Url) {
        for observer in &self.inner.observers {
            observer.on_discovered(location);
        }
    }

    fn notify_crawled(&self, resource: Option<&CrawlResult>) {
        for observer in &self.inner.observers {
            observer.on_crawled(resource);
        }
    }
}
