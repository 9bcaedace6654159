//! Live progress rendering from traversal events

use crate::crawler::{CrawlObserver, CrawlResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

/// Progress-bar observer
///
/// The bar length tracks discovered locations and the position tracks
/// finished ones, so the bar fills as the traversal converges. Event
/// handlers only touch atomics and the bar's own internal state, keeping the
/// synchronous observer callbacks cheap.
pub struct ProgressReporter {
    bar: ProgressBar,
    discovered: AtomicU64,
    finished: AtomicU64,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:60.green/dim}] {pos}/{len} {percent:>3}% {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        Self {
            bar,
            discovered: AtomicU64::new(0),
            finished: AtomicU64::new(0),
        }
    }

    /// Hidden variant for quiet mode; events are still counted
    pub fn hidden() -> Self {
        let reporter = Self::new();
        reporter.bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        reporter
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlObserver for ProgressReporter {
    fn on_discovered(&self, _location: &Url) {
        let discovered = self.discovered.fetch_add(1, Ordering::SeqCst) + 1;
        self.bar.set_length(discovered);
    }

    fn on_crawled(&self, _resource: Option<&CrawlResult>) {
        let finished = self.finished.fetch_add(1, Ordering::SeqCst) + 1;
        self.bar.set_position(finished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_move_the_bar() {
        let reporter = ProgressReporter::hidden();
        let location = Url::parse("http://h/a").unwrap();

        reporter.on_discovered(&location);
        reporter.on_discovered(&location);
        reporter.on_crawled(None);

        assert_eq!(reporter.bar.length(), Some(2));
        assert_eq!(reporter.bar.position(), 1);
        reporter.finish();
    }
}
