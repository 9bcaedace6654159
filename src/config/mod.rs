//! Run configuration
//!
//! Settings resolve in three layers: built-in defaults, an optional TOML
//! config file, and explicit command-line flags, each overriding the last.
//! The file carries only the keys it wants to override.

mod types;

pub use types::{ClassifierSection, CrawlerSection, FileConfig, OutputSection, Settings};

use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a TOML config file
pub fn load_file(path: &Path) -> ConfigResult<FileConfig> {
    let raw = std::fs::read_to_string(path)?;
    let config = toml::from_str(&raw)?;
    Ok(config)
}
