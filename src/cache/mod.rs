//! Cache override hook
//!
//! An optional capability consulted before every network fetch. A hook that
//! reports `skip` supplies previously obtained content (or none) and the
//! engine bypasses the network entirely for that location. Hooks perform
//! local lookups only; they must not do network I/O.

mod disk;

pub use disk::DiskCache;

use url::Url;

/// Answer from a cache lookup
#[derive(Debug, Clone, Default)]
pub struct CacheLookup {
    /// Bypass the network fetch for this location
    pub skip: bool,
    /// Whether the cached content is text-like; `None` when unknown
    pub is_text: Option<bool>,
    /// Previously obtained content, when available
    pub content: Option<String>,
}

impl CacheLookup {
    /// The location is not cached; proceed to network fetch
    pub fn miss() -> Self {
        Self::default()
    }

    /// The location is cached with the given content
    pub fn hit(is_text: bool, content: String) -> Self {
        Self {
            skip: true,
            is_text: Some(is_text),
            content: Some(content),
        }
    }
}

/// Capability interface for short-circuiting network fetches
pub trait CacheOverride: Send + Sync {
    /// Consulted once per claimed location, before its network fetch
    fn lookup(&self, location: &Url) -> CacheLookup;
}
