//! Linkdive main entry point
//!
//! Command-line interface for the bounded-depth link-following retriever.

use clap::Parser;
use linkdive::cache::DiskCache;
use linkdive::config::{self, Settings};
use linkdive::crawler::Crawler;
use linkdive::output::{ProgressReporter, ResourceWriter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Linkdive: a bounded-depth link-following retriever
///
/// Fetches the entry resource, extracts embedded references from text-like
/// content, and recursively fetches each discovered reference up to the
/// configured depth, mirroring everything under the output directory.
#[derive(Parser, Debug)]
#[command(name = "linkdive")]
#[command(version)]
#[command(about = "Bounded-depth link-following retriever", long_about = None)]
struct Cli {
    /// Where the crawler starts crawling
    #[arg(value_name = "ENTRY_POINT")]
    entry_point: String,

    /// Depth of recursion; be careful raising this, it multiplies network load
    #[arg(short = 'd', long = "crawl-depth")]
    crawl_depth: Option<u32>,

    /// Treat every fetched resource as text and search it for references
    #[arg(short = 'f', long = "force-discover")]
    force_discover: bool,

    /// Flush results to disk as they arrive instead of after the run
    #[arg(short = 'w', long = "write-simul")]
    write_simultaneously: bool,

    /// Treat 301/302 responses as fetch failures instead of following them
    #[arg(long = "no-redirect")]
    no_redirect: bool,

    /// Per-request timeout in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Base output directory to write results to
    #[arg(short = 'o', long = "output-path")]
    output_path: Option<PathBuf>,

    /// Skip locations already present in the output directory
    #[arg(short = 'c', long = "disk-cache")]
    disk_cache: bool,

    /// Worker thread count; defaults to the runtime's own choice
    #[arg(short = 'm', long)]
    threads: Option<usize>,

    /// TOML config file overlaying the built-in defaults
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let settings = resolve_settings(&cli)?;
    let show_progress = cli.verbose == 0 && !cli.quiet;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = settings.threads {
        builder.worker_threads(threads);
    }
    let runtime = builder.build()?;
    runtime.block_on(run(settings, show_progress))
}

/// Resolves run settings: defaults, then config file, then CLI flags
fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from {}", path.display());
        settings.apply_file(config::load_file(path)?);
    }

    settings.entry_point = cli.entry_point.clone();
    if let Some(depth) = cli.crawl_depth {
        settings.depth = depth;
    }
    if let Some(timeout) = cli.timeout {
        settings.timeout_secs = timeout;
    }
    if let Some(path) = &cli.output_path {
        settings.output_path = path.clone();
    }
    if cli.no_redirect {
        settings.follow_redirect = false;
    }
    if cli.force_discover {
        settings.force_discover = true;
    }
    if cli.write_simultaneously {
        settings.write_simultaneously = true;
    }
    if cli.disk_cache {
        settings.use_disk_cache = true;
    }
    if let Some(threads) = cli.threads {
        settings.threads = Some(threads);
    }

    settings.validate()?;
    Ok(settings)
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkdive=warn"),
            1 => EnvFilter::new("linkdive=info,warn"),
            2 => EnvFilter::new("linkdive=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Wires observers and the cache hook, runs the crawl, flushes results
async fn run(settings: Settings, show_progress: bool) -> anyhow::Result<()> {
    let progress = Arc::new(if show_progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::hidden()
    });
    let writer = Arc::new(ResourceWriter::new(settings.output_path.clone()));

    let mut builder = Crawler::builder(settings.crawl_options()).subscribe(progress.clone());
    if settings.write_simultaneously {
        builder = builder.subscribe(writer.clone());
    }
    if settings.use_disk_cache {
        builder = builder.cache(Arc::new(DiskCache::new(
            settings.output_path.clone(),
            settings.text_extensions.clone(),
        )));
    }
    let crawler = builder.build();

    let resources = crawler
        .crawl(&settings.entry_point, settings.force_discover, settings.depth)
        .await?;

    if !settings.write_simultaneously {
        for resource in &resources {
            writer.enqueue(resource);
        }
    }
    println!("Waiting for results to be flushed to disk...");
    writer.flush().await?;
    progress.finish();

    let counters = crawler.counters();
    println!("Crawling finished with {} errors.", counters.errors);
    if settings.use_disk_cache {
        println!(
            "{} resources were resolved from the disk cache.",
            counters.externally_resolved
        );
    }
    Ok(())
}
