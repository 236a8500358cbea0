//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with error classification
//! - HTML parsing: link, title, and readable-text extraction
//! - Streaming artifact downloads
//! - The driver loop tying it all together

mod downloader;
mod driver;
mod fetcher;
mod parser;

pub use downloader::download;
pub use driver::{CrawlReport, Driver};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{extract_text, parse_page, PageContent};

use crate::config::Config;
use crate::SiftError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Runs a complete crawl from the configured seed URL
///
/// Convenience wrapper that builds a [`Driver`] and runs it to completion
/// (or until the stop flag is raised).
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
/// * `stop` - External stop signal, checked between iterations
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Summary of the finished (or interrupted) crawl
/// * `Err(SiftError)` - Failed to initialize the HTTP client
pub async fn crawl(config: Config, stop: Arc<AtomicBool>) -> Result<CrawlReport, SiftError> {
    let mut driver = Driver::new(config, stop)?;
    Ok(driver.run().await)
}
