//! Asynchronous resource persistence

use crate::crawler::{CrawlObserver, CrawlResult};
use crate::output::local_path;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::task::JoinHandle;

/// Writes retrieved resources under an output root
///
/// Each enqueued resource is written on its own spawned task; `flush` awaits
/// everything enqueued so far. Subscribing the writer as an observer enables
/// write-as-results-arrive mode: every successful `on_crawled` enqueues the
/// resource immediately instead of waiting for the end of the run.
pub struct ResourceWriter {
    root: PathBuf,
    pending: Mutex<Vec<JoinHandle<std::io::Result<()>>>>,
}

impl ResourceWriter {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Starts writing one resource in the background
    pub fn enqueue(&self, resource: &CrawlResult) {
        let path = local_path(&self.root, &resource.location, resource.media_type.as_deref());
        let data = resource.data.clone();
        let handle = tokio::spawn(async move {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tracing::debug!("Writing {} bytes to {}", data.len(), path.display());
            tokio::fs::write(&path, &data).await
        });
        self.pending.lock().unwrap().push(handle);
    }

    /// Awaits every write enqueued so far, surfacing the first failure
    pub async fn flush(&self) -> std::io::Result<()> {
        let handles = {
            let mut pending = self.pending.lock().unwrap();
            std::mem::take(&mut *pending)
        };
        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => first_error = first_error.or(Some(e)),
                Err(e) => first_error = first_error.or(Some(std::io::Error::other(e))),
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl CrawlObserver for ResourceWriter {
    fn on_crawled(&self, resource: Option<&CrawlResult>) {
        if let Some(resource) = resource {
            self.enqueue(resource);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn resource(location: &str, data: &[u8], media_type: Option<&str>) -> CrawlResult {
        CrawlResult {
            location: Url::parse(location).unwrap(),
            data: data.to_vec(),
            media_type: media_type.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_writes_resource_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResourceWriter::new(dir.path().to_path_buf());

        writer.enqueue(&resource("http://h/a/page.html", b"<html></html>", None));
        writer.flush().await.unwrap();

        let written = std::fs::read(dir.path().join("h-80/a/page.html")).unwrap();
        assert_eq!(written, b"<html></html>");
    }

    #[tokio::test]
    async fn test_index_with_guessed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResourceWriter::new(dir.path().to_path_buf());

        writer.enqueue(&resource("http://h/", b"home", Some("text/html")));
        writer.flush().await.unwrap();

        assert!(dir.path().join("h-80/index.html").exists());
    }

    #[tokio::test]
    async fn test_observer_mode_writes_successful_results_only() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResourceWriter::new(dir.path().to_path_buf());

        writer.on_crawled(Some(&resource("http://h/x.txt", b"x", None)));
        writer.on_crawled(None);
        writer.flush().await.unwrap();

        assert!(dir.path().join("h-80/x.txt").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_flush_with_nothing_pending() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResourceWriter::new(dir.path().to_path_buf());
        writer.flush().await.unwrap();
    }
}
