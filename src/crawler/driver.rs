//! Crawl driver - the main control loop
//!
//! Pulls URLs from the crawl state one at a time, routes each to either the
//! artifact downloader or the page pipeline (fetch, parse, extract links,
//! optionally persist text), and feeds newly discovered URLs back into the
//! state. Per-URL failures are logged and isolated; nothing that happens
//! while processing one URL can abort the crawl.

use crate::config::Config;
use crate::crawler::downloader::download;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::parser::{extract_text, parse_page};
use crate::output::{download_filename, sanitize_filename, write_page_text};
use crate::state::CrawlState;
use crate::SiftError;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Summary of a finished (or interrupted) crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Pages fetched and parsed successfully
    pub pages_visited: usize,

    /// Total links found across all visited pages (pre-dedup across pages)
    pub links_found: usize,

    /// Artifacts downloaded successfully
    pub downloads: usize,

    /// URLs whose fetch, download, or write failed (marked visited, skipped)
    pub failures: usize,

    /// URLs still pending when the crawl stopped (non-zero only when
    /// interrupted)
    pub pending_remaining: usize,
}

/// The crawl driver
///
/// Owns the HTTP client and the shared crawl state, and runs the crawl to
/// completion. Processing is sequential (one URL at a time); the crawl
/// state itself is safe for concurrent workers, so scaling out requires no
/// change here beyond spawning more loops against the same state.
pub struct Driver {
    config: Config,
    state: Arc<CrawlState>,
    client: Client,
    stop: Arc<AtomicBool>,
    report: CrawlReport,
}

impl Driver {
    /// Creates a driver seeded with the configured seed URL
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(config: Config, stop: Arc<AtomicBool>) -> Result<Self, SiftError> {
        let client = build_http_client()?;
        let state = Arc::new(CrawlState::new());
        state.discover(config.seed_url.as_str());

        Ok(Self {
            config,
            state,
            client,
            stop,
            report: CrawlReport::default(),
        })
    }

    /// Returns a handle to the shared crawl state
    pub fn state(&self) -> Arc<CrawlState> {
        Arc::clone(&self.state)
    }

    /// Runs the crawl until the pending queue is empty or the stop flag is
    /// raised
    ///
    /// Termination is guaranteed for a finite reachable URL graph: every
    /// URL moves to visited exactly once and never re-enters the queue.
    /// When stopped externally, unvisited work simply remains pending;
    /// because processing is sequential, no URL is in process at the check
    /// point, so nothing needs releasing.
    pub async fn run(&mut self) -> CrawlReport {
        tracing::info!("Starting crawl from {}", self.config.seed_url);

        loop {
            if self.stop.load(Ordering::SeqCst) {
                tracing::info!(
                    "Stop requested, halting with {} URLs pending",
                    self.state.pending_len()
                );
                break;
            }

            if !self.step().await {
                tracing::info!("Pending queue is empty, crawl complete");
                break;
            }
        }

        self.report.pending_remaining = self.state.pending_len();
        self.report.clone()
    }

    /// Processes a single pending URL
    ///
    /// Returns false when the pending queue was empty and no work was done.
    pub async fn step(&mut self) -> bool {
        let Some(url) = self.state.take_next() else {
            return false;
        };

        let download_dir = self
            .config
            .download
            .as_ref()
            .filter(|d| d.pattern.is_match(&url))
            .map(|d| d.dir.clone());

        match download_dir {
            Some(dir) => self.process_download(&url, &dir).await,
            None => self.process_page(&url).await,
        }

        true
    }

    /// Downloads a URL matching the download pattern
    ///
    /// Download targets are leaves: the body is streamed to disk and the
    /// URL is never parsed for links or text.
    async fn process_download(&mut self, url: &str, dir: &std::path::Path) {
        if !self.state.claim(url) {
            tracing::debug!("Skipping {} (already claimed or visited)", url);
            return;
        }

        match self.download_to_disk(url, dir).await {
            Ok(destination) => {
                tracing::info!("Downloaded {} -> {}", url, destination.display());
                self.report.downloads += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", url, e);
                self.report.failures += 1;
            }
        }

        self.state.complete(url);
    }

    async fn download_to_disk(
        &self,
        url: &str,
        dir: &std::path::Path,
    ) -> Result<std::path::PathBuf, SiftError> {
        let parsed = Url::parse(url)?;
        let destination = dir.join(download_filename(&parsed));
        download(&self.client, url, &destination).await?;
        Ok(destination)
    }

    /// Fetches and processes a crawlable page
    async fn process_page(&mut self, url: &str) {
        if !self.state.claim(url) {
            tracing::debug!("Skipping {} (already claimed or visited)", url);
            return;
        }

        match fetch_url(&self.client, url).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                let page = parse_page(&body, &final_url);

                if self.config.save_text {
                    self.save_page_text(url, &body, page.title.as_deref());
                }

                for link in &page.links {
                    if self.config.is_download_target(link) || self.config.in_crawl_scope(link) {
                        self.state.discover(link);
                    } else {
                        tracing::trace!("Leaf URL (out of scope): {}", link);
                    }
                }

                tracing::info!("Visited {} ({} links found)", url, page.links.len());
                self.report.pages_visited += 1;
                self.report.links_found += page.links.len();
            }

            FetchResult::NotHtml { content_type } => {
                tracing::info!("Skipping {} (Content-Type {})", url, content_type);
                self.report.pages_visited += 1;
            }

            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to crawl {}: HTTP {}", url, status_code);
                self.report.failures += 1;
            }

            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to crawl {}: {}", url, error);
                self.report.failures += 1;
            }
        }

        // Terminal regardless of outcome: failed URLs are not retried.
        self.state.complete(url);
    }

    /// Extracts the page text and writes it under the page title
    ///
    /// Pages without a title fall back to a filename derived from the URL.
    /// Write failures are reported and swallowed; the crawl continues.
    fn save_page_text(&mut self, url: &str, body: &str, title: Option<&str>) {
        let text = extract_text(body);

        let name = title
            .map(sanitize_filename)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| sanitize_filename(url));

        match write_page_text(&self.config.output_dir, &name, &text) {
            Ok(path) => {
                tracing::debug!("Saved text for {} to {}", url, path.display());
            }
            Err(e) => {
                tracing::warn!("Failed to save text for {}: {}", url, e);
                self.report.failures += 1;
            }
        }
    }
}
