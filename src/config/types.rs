use crate::config::validation::{compile_pattern, parse_seed_url};
use crate::ConfigResult;
use regex::Regex;
use std::path::PathBuf;
use url::Url;

/// Immutable crawler configuration
///
/// Built once at startup via [`Config::build`] and never modified during a
/// crawl.
#[derive(Debug, Clone)]
pub struct Config {
    /// The URL the crawl starts from
    pub seed_url: Url,

    /// Directory page-text files are written to
    pub output_dir: PathBuf,

    /// Whether to extract and save readable page text
    pub save_text: bool,

    /// Artifact download settings; None disables downloading entirely
    pub download: Option<DownloadConfig>,

    /// Discovered URLs must match this pattern to be crawled recursively;
    /// None means every discovered URL is in scope
    pub scope_pattern: Option<Regex>,
}

/// Artifact download configuration
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Case-insensitive pattern selecting URLs to download instead of crawl
    pub pattern: Regex,

    /// Directory downloaded artifacts are written to
    pub dir: PathBuf,
}

impl Config {
    /// Builds and validates a configuration from raw CLI values
    ///
    /// # Arguments
    ///
    /// * `seed` - The seed URL string
    /// * `output_dir` - Output directory for page text
    /// * `save_text` - Whether to persist extracted text
    /// * `download_pattern` - Download pattern, if downloading is enabled
    /// * `download_dir` - Download directory; defaults to `output_dir`
    /// * `scope_pattern` - Optional crawl-scope pattern
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ConfigError`] if the seed URL is not an absolute
    /// HTTP(S) URL or a pattern fails to compile. These are the only fatal
    /// startup conditions.
    pub fn build(
        seed: &str,
        output_dir: PathBuf,
        save_text: bool,
        download_pattern: Option<&str>,
        download_dir: Option<PathBuf>,
        scope_pattern: Option<&str>,
    ) -> ConfigResult<Self> {
        let seed_url = parse_seed_url(seed)?;

        let download = match download_pattern {
            Some(pattern) => Some(DownloadConfig {
                pattern: compile_pattern(pattern)?,
                dir: download_dir.unwrap_or_else(|| output_dir.clone()),
            }),
            None => None,
        };

        let scope_pattern = match scope_pattern {
            Some(pattern) => Some(compile_pattern(pattern)?),
            None => None,
        };

        Ok(Self {
            seed_url,
            output_dir,
            save_text,
            download,
            scope_pattern,
        })
    }

    /// Returns true if the URL should be downloaded rather than crawled
    pub fn is_download_target(&self, url: &str) -> bool {
        self.download
            .as_ref()
            .map(|d| d.pattern.is_match(url))
            .unwrap_or(false)
    }

    /// Returns true if the URL is eligible for recursive crawling
    ///
    /// URLs outside the scope pattern are leaves: they are recorded as
    /// discovered but never fetched (unless they match the download
    /// pattern, which takes precedence).
    pub fn in_crawl_scope(&self, url: &str) -> bool {
        self.scope_pattern
            .as_ref()
            .map(|p| p.is_match(url))
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_basic(seed: &str) -> ConfigResult<Config> {
        Config::build(seed, PathBuf::from("."), false, None, None, None)
    }

    #[test]
    fn test_build_minimal_config() {
        let config = build_basic("https://example.com/").unwrap();
        assert_eq!(config.seed_url.as_str(), "https://example.com/");
        assert!(config.download.is_none());
        assert!(config.scope_pattern.is_none());
    }

    #[test]
    fn test_invalid_seed_is_fatal() {
        assert!(build_basic("not a url").is_err());
        assert!(build_basic("ftp://example.com/").is_err());
    }

    #[test]
    fn test_download_pattern_case_insensitive() {
        let config = Config::build(
            "https://example.com/",
            PathBuf::from("."),
            false,
            Some("pdf$"),
            None,
            None,
        )
        .unwrap();

        assert!(config.is_download_target("https://example.com/file.pdf"));
        assert!(config.is_download_target("https://example.com/FILE.PDF"));
        assert!(!config.is_download_target("https://example.com/page.html"));
    }

    #[test]
    fn test_download_dir_defaults_to_output_dir() {
        let config = Config::build(
            "https://example.com/",
            PathBuf::from("out"),
            false,
            Some("pdf$"),
            None,
            None,
        )
        .unwrap();

        assert_eq!(config.download.unwrap().dir, PathBuf::from("out"));
    }

    #[test]
    fn test_no_download_pattern_means_no_targets() {
        let config = build_basic("https://example.com/").unwrap();
        assert!(!config.is_download_target("https://example.com/file.pdf"));
    }

    #[test]
    fn test_scope_pattern_restricts_crawling() {
        let config = Config::build(
            "https://example.com/",
            PathBuf::from("."),
            false,
            None,
            None,
            Some("^https://example\\.com/docs/"),
        )
        .unwrap();

        assert!(config.in_crawl_scope("https://example.com/docs/page"));
        assert!(!config.in_crawl_scope("https://other.com/page"));
    }

    #[test]
    fn test_no_scope_pattern_means_everything_in_scope() {
        let config = build_basic("https://example.com/").unwrap();
        assert!(config.in_crawl_scope("https://anything.example/at-all"));
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let result = Config::build(
            "https://example.com/",
            PathBuf::from("."),
            false,
            Some("(unclosed"),
            None,
            None,
        );
        assert!(result.is_err());
    }
}
