//! Pagesift main entry point
//!
//! Command-line interface for the pagesift focused crawler.

use clap::Parser;
use pagesift::config::Config;
use pagesift::crawler::crawl;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Pagesift: a focused text-harvesting web crawler
///
/// Starting from a seed URL, pagesift visits every reachable page exactly
/// once, optionally saving each page's readable text to a file named after
/// its title. URLs matching the download pattern are saved as binary
/// artifacts instead of being crawled.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version)]
#[command(about = "A focused text-harvesting web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Directory to write extracted page text into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Extract readable text from each page and save it as <title>.txt
    #[arg(long)]
    save_text: bool,

    /// Download URLs matching the download pattern instead of crawling them
    #[arg(long)]
    download: bool,

    /// Case-insensitive regex selecting URLs to download (with --download)
    #[arg(long, default_value = "pdf$")]
    download_pattern: String,

    /// Directory downloaded artifacts are written to (defaults to the
    /// output directory)
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Case-insensitive regex restricting which discovered URLs are crawled
    /// recursively; non-matching URLs are treated as leaves
    #[arg(long)]
    scope_pattern: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = Config::build(
        &cli.seed,
        cli.output_dir,
        cli.save_text,
        cli.download.then_some(cli.download_pattern.as_str()),
        cli.download_dir,
        cli.scope_pattern.as_deref(),
    )?;

    // Ctrl-C raises the stop flag; the driver halts between pages.
    let stop = Arc::new(AtomicBool::new(false));
    let stop_handle = Arc::clone(&stop);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current page");
            stop_handle.store(true, Ordering::SeqCst);
        }
    });

    let report = crawl(config, stop).await?;

    println!("\n=== Crawl Summary ===");
    println!("Pages visited:   {}", report.pages_visited);
    println!("Links found:     {}", report.links_found);
    println!("Downloads:       {}", report.downloads);
    println!("Failures:        {}", report.failures);
    if report.pending_remaining > 0 {
        println!("Pending (interrupted): {}", report.pending_remaining);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesift=info,warn"),
            1 => EnvFilter::new("pagesift=debug,info"),
            2 => EnvFilter::new("pagesift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
