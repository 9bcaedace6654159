//! Linkdive: a bounded-depth link-following retriever
//!
//! This crate fetches a resource from an entry location, extracts embedded
//! references from text-like content, and recursively fetches each discovered
//! reference up to a fixed depth, collecting the retrieved resources and
//! live traversal counters along the way.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;
use url::Url;

/// Main error type for linkdive operations
///
/// Ordinary fetch failures (timeouts, connection errors, non-success status
/// codes) never surface here; they are absorbed per branch and reflected in
/// the traversal counters. Only invalid call usage and redirect protocol
/// inconsistencies terminate a crawl exceptionally.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("crawl depth must be at least 1")]
    DepthZero,

    #[error("a crawl is already in progress on this crawler instance")]
    AlreadyCrawling,

    #[error("invalid entry point: {0}")]
    InvalidEntryPoint(#[from] url::ParseError),

    #[error("code {status} at {location} tried to redirect but no target location was found")]
    RedirectMissingLocation { status: u16, location: Url },

    #[error("crawl task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{CacheLookup, CacheOverride, DiskCache};
pub use config::Settings;
pub use crawler::{CrawlObserver, CrawlOptions, CrawlResult, Crawler};
pub use state::{CounterSnapshot, TraversalCounters, VisitedSet};
