use crate::crawler::{CrawlOptions, DEFAULT_TEXT_EXTENSIONS};
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Optional overrides read from a TOML config file
///
/// Every key is optional; absent keys leave the current value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub crawler: Option<CrawlerSection>,
    pub output: Option<OutputSection>,
    pub classifier: Option<ClassifierSection>,
}

/// `[crawler]` section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlerSection {
    #[serde(rename = "crawl-depth")]
    pub crawl_depth: Option<u32>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    #[serde(rename = "follow-redirect")]
    pub follow_redirect: Option<bool>,

    #[serde(rename = "force-discover")]
    pub force_discover: Option<bool>,

    /// Tokio worker thread count; defaults to the runtime's own choice
    pub threads: Option<usize>,
}

/// `[output]` section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSection {
    /// Base output directory
    pub path: Option<String>,

    #[serde(rename = "write-simultaneously")]
    pub write_simultaneously: Option<bool>,

    #[serde(rename = "disk-cache")]
    pub disk_cache: Option<bool>,
}

/// `[classifier]` section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierSection {
    #[serde(rename = "text-extensions")]
    pub text_extensions: Option<Vec<String>>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub entry_point: String,
    pub depth: u32,
    pub timeout_secs: u64,
    pub follow_redirect: bool,
    pub force_discover: bool,
    pub output_path: PathBuf,
    pub write_simultaneously: bool,
    pub use_disk_cache: bool,
    pub threads: Option<usize>,
    pub text_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entry_point: String::new(),
            depth: 2,
            timeout_secs: 10,
            follow_redirect: true,
            force_discover: false,
            output_path: PathBuf::from("crawl-result"),
            write_simultaneously: false,
            use_disk_cache: false,
            threads: None,
            text_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Overlays config-file values onto these settings
    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(crawler) = file.crawler {
            if let Some(depth) = crawler.crawl_depth {
                self.depth = depth;
            }
            if let Some(timeout) = crawler.timeout {
                self.timeout_secs = timeout;
            }
            if let Some(follow) = crawler.follow_redirect {
                self.follow_redirect = follow;
            }
            if let Some(force) = crawler.force_discover {
                self.force_discover = force;
            }
            if let Some(threads) = crawler.threads {
                self.threads = Some(threads);
            }
        }
        if let Some(output) = file.output {
            if let Some(path) = output.path {
                self.output_path = PathBuf::from(path);
            }
            if let Some(write) = output.write_simultaneously {
                self.write_simultaneously = write;
            }
            if let Some(cache) = output.disk_cache {
                self.use_disk_cache = cache;
            }
        }
        if let Some(classifier) = file.classifier {
            if let Some(extensions) = classifier.text_extensions {
                self.text_extensions = extensions;
            }
        }
    }

    /// Rejects settings no run could work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.entry_point.is_empty() {
            return Err(ConfigError::Validation("entry point is required".into()));
        }
        if self.depth == 0 {
            return Err(ConfigError::Validation(
                "crawl-depth must be at least 1".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout must be at least 1 second".into(),
            ));
        }
        if self.text_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "text-extensions must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Engine options derived from these settings
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            follow_redirect: self.follow_redirect,
            text_extensions: self.text_extensions.clone(),
        }
    }
}
