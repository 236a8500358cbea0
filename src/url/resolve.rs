use url::Url;

/// Resolves a possibly-relative href against a page's base URL
///
/// If `href` already carries an HTTP(S) scheme it is returned unchanged;
/// otherwise it is resolved relative to `base` per standard URL-resolution
/// rules (scheme/host inheritance, `.`/`..` segments, query and fragment
/// handling).
///
/// There is no error case: an href that cannot be joined is returned as-is,
/// best effort. Callers must not assume the result is fetchable and should
/// re-validate before issuing a request.
///
/// # Arguments
///
/// * `base` - The base URL of the page the href was found on
/// * `href` - The raw href attribute value
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pagesift::url::resolve_href;
///
/// let base = Url::parse("https://a.com/x/").unwrap();
/// assert_eq!(resolve_href(&base, "../y"), "https://a.com/y");
/// assert_eq!(resolve_href(&base, "http://b.com/z"), "http://b.com/z");
/// ```
pub fn resolve_href(base: &Url, href: &str) -> String {
    let href = href.trim();

    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    match base.join(href) {
        Ok(absolute) => absolute.to_string(),
        Err(_) => href.to_string(),
    }
}
