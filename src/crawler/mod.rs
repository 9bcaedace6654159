//! Crawler module for resource fetching and traversal
//!
//! This module contains the core traversal logic, including:
//! - The recursive fetch-discover-fetch engine
//! - Per-host HTTP client management
//! - Text/binary content classification
//! - Embedded reference extraction
//! - Observer notification at traversal lifecycle points

mod classify;
mod client;
mod engine;
mod extract;
mod observer;

pub use classify::{is_text_like, DEFAULT_TEXT_EXTENSIONS};
pub use client::{build_http_client, fetch, ClientRegistry, FetchOutcome};
pub use engine::{Crawler, CrawlerBuilder};
pub use extract::extract_references;
pub use observer::CrawlObserver;

use std::time::Duration;
use url::Url;

/// The result of one successfully fetched location
///
/// Created exactly once per fetched location and never mutated afterwards;
/// ownership moves to the caller aggregating the run's results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// The location this resource was fetched from
    pub location: Url,
    /// Raw response payload
    pub data: Vec<u8>,
    /// Declared media type, parameters stripped (`text/html; charset=utf-8`
    /// becomes `text/html`)
    pub media_type: Option<String>,
}

/// Engine options fixed for the lifetime of a `Crawler`
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Per-request timeout applied to every host client
    pub timeout: Duration,
    /// Follow 301/302 responses to their target location; when disabled they
    /// are ordinary fetch failures
    pub follow_redirect: bool,
    /// Extension allow-list consulted when a resource carries no text-like
    /// media type
    pub text_extensions: Vec<String>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            follow_redirect: true,
            text_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}
