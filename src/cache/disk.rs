//! Disk cache backed by a previous run's output directory

use crate::cache::{CacheLookup, CacheOverride};
use crate::output::local_path;
use std::path::PathBuf;
use url::Url;

/// Cache override that resolves locations against resources already written
/// to an output directory by an earlier run
///
/// The lookup derives the same local path the persistence layer would write
/// the location to (with no media type known, so no guessed extension) and
/// reports a hit when a readable file exists there. Text-likeness comes from
/// the file's extension against the configured allow-list; a file with no
/// extension is treated as binary.
pub struct DiskCache {
    root: PathBuf,
    text_extensions: Vec<String>,
}

impl DiskCache {
    pub fn new(root: PathBuf, text_extensions: Vec<String>) -> Self {
        Self {
            root,
            text_extensions,
        }
    }
}

impl CacheOverride for DiskCache {
    fn lookup(&self, location: &Url) -> CacheLookup {
        let path = local_path(&self.root, location, None);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return CacheLookup::miss(),
        };
        tracing::debug!("Disk cache hit for {} at {}", location, path.display());

        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.text_extensions
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);
        CacheLookup::hit(is_text, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::DEFAULT_TEXT_EXTENSIONS;
    use std::fs;

    fn extensions() -> Vec<String> {
        DEFAULT_TEXT_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    }

    fn location(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_missing_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path().to_path_buf(), extensions());
        let lookup = cache.lookup(&location("http://h/absent.html"));
        assert!(!lookup.skip);
        assert!(lookup.content.is_none());
    }

    #[test]
    fn test_text_extension_hit() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("h-80");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("page.html"), "<a href='x'>cached</a>").unwrap();

        let cache = DiskCache::new(dir.path().to_path_buf(), extensions());
        let lookup = cache.lookup(&location("http://h/page.html"));
        assert!(lookup.skip);
        assert_eq!(lookup.is_text, Some(true));
        assert_eq!(lookup.content.as_deref(), Some("<a href='x'>cached</a>"));
    }

    #[test]
    fn test_unknown_extension_is_binary_hit() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("h-80");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("data.csv"), "a,b").unwrap();

        let cache = DiskCache::new(dir.path().to_path_buf(), extensions());
        let lookup = cache.lookup(&location("http://h/data.csv"));
        assert!(lookup.skip);
        assert_eq!(lookup.is_text, Some(false));
    }

    #[test]
    fn test_no_extension_is_binary_hit() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("h-80");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("blob"), "payload").unwrap();

        let cache = DiskCache::new(dir.path().to_path_buf(), extensions());
        let lookup = cache.lookup(&location("http://h/blob"));
        assert!(lookup.skip);
        assert_eq!(lookup.is_text, Some(false));
    }

    #[test]
    fn test_directory_index_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("h-80").join("docs");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("index"), "<html></html>").unwrap();

        let cache = DiskCache::new(dir.path().to_path_buf(), extensions());
        let lookup = cache.lookup(&location("http://h/docs/"));
        assert!(lookup.skip);
        assert_eq!(lookup.is_text, Some(false));
    }
}
