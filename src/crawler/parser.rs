//! HTML parser: link, title, and readable-text extraction
//!
//! Parsing happens entirely in memory on the fetched body; nothing here
//! touches the network or the filesystem. Link resolution uses the page's
//! `<base href>` when it is usable, falling back to the fetch's final
//! (post-redirect) URL.

use crate::url::resolve_href;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracted information from a crawled HTML page
///
/// Ephemeral: lives only long enough for the driver to feed the links back
/// into the crawl state and (optionally) persist the page text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// The page title (from the <title> tag), trimmed, if present
    pub title: Option<String>,

    /// The base URL links were resolved against
    pub base_url: Url,

    /// All anchor hrefs on the page, resolved to absolute form and
    /// deduplicated
    pub links: HashSet<String>,
}

/// Parses an HTML page and extracts its title and outgoing links
///
/// # Base URL selection
///
/// The page's `<base href>` wins when it parses as an absolute HTTP(S)
/// URL. Otherwise the fetch's final URL is used; an unusable `<base>` tag
/// is logged as a warning but never aborts processing.
///
/// # Arguments
///
/// * `html` - The fetched page body
/// * `final_url` - The final URL of the fetch, after redirects
pub fn parse_page(html: &str, final_url: &Url) -> PageContent {
    let document = Html::parse_document(html);

    let base_url = choose_base_url(&document, final_url);
    let title = extract_title(&document);
    let links = extract_links(&document, &base_url);

    PageContent {
        title,
        base_url,
        links,
    }
}

/// Picks the base URL for resolving this page's relative links
fn choose_base_url(document: &Html, final_url: &Url) -> Url {
    let selector = match Selector::parse("base[href]") {
        Ok(s) => s,
        Err(_) => return final_url.clone(),
    };

    let Some(href) = document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
    else {
        return final_url.clone();
    };

    match Url::parse(href.trim()) {
        Ok(base) if base.scheme() == "http" || base.scheme() == "https" => base,
        _ => {
            tracing::warn!(
                "Base URL '{}' ill-defined for page {}, using final URL",
                href,
                final_url
            );
            final_url.clone()
        }
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Extracts all anchor links, resolved against the base URL
///
/// Non-navigable hrefs (javascript:, mailto:, tel:, data:, bare fragments)
/// are skipped; everything else goes through best-effort resolution and
/// into the set.
fn extract_links(document: &Html, base_url: &Url) -> HashSet<String> {
    let mut links = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();

                if href.is_empty()
                    || href.starts_with('#')
                    || href.starts_with("javascript:")
                    || href.starts_with("mailto:")
                    || href.starts_with("tel:")
                    || href.starts_with("data:")
                {
                    continue;
                }

                links.insert(resolve_href(base_url, href));
            }
        }
    }

    links
}

/// Extracts cleaned, readable text from an HTML page
///
/// Script and style elements are removed, the remaining visible text is
/// split into lines, each line is trimmed and split on double-space runs
/// into phrases, empty phrases are dropped, and the survivors are rejoined
/// with newlines. Deliberately lossy: intentional multi-space formatting
/// does not survive.
pub fn extract_text(html: &str) -> String {
    let mut document = Html::parse_document(html);

    // Detach script/style subtrees so their contents never appear as text.
    if let Ok(selector) = Selector::parse("script, style") {
        let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
    }

    let raw: String = document.root_element().text().collect();

    let mut phrases = Vec::new();
    for line in raw.lines() {
        for phrase in line.trim().split("  ") {
            let phrase = phrase.trim();
            if !phrase.is_empty() {
                phrases.push(phrase);
            }
        }
    }

    phrases.join("\n")
}
