use crate::ConfigError;
use regex::{Regex, RegexBuilder};
use url::Url;

/// Parses and validates a seed URL
///
/// The seed must be an absolute HTTP or HTTPS URL; anything else is a fatal
/// configuration error.
pub fn parse_seed_url(seed: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(seed).map_err(|e| ConfigError::InvalidSeed {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidSeed {
            url: seed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

/// Compiles a user-supplied URL pattern, case-insensitively
///
/// Both the download pattern and the crawl-scope pattern go through here.
pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}
