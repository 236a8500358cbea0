//! HTTP fetcher implementation
//!
//! The single boundary between pagesift and the network. Fetch outcomes are
//! returned as data (`FetchResult`), never as `Err`: a failed fetch is a
//! normal, per-URL event the driver inspects to decide what to do next, and
//! it must never abort the overall crawl.

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects; used as the fallback base for link
        /// resolution
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server responded, but not with HTML
    NotHtml {
        /// The Content-Type header received
        content_type: String,
    },

    /// The server responded with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport-level failure (DNS, connect, timeout, TLS)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client used for both crawling and downloading
///
/// Redirects are followed by the client; the final post-redirect URL is
/// reported in [`FetchResult::Success`]. Timeouts bound every request so a
/// hung fetch cannot stall the crawl indefinitely.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("pagesift/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with HTML (or unlabeled) body | `Success` |
/// | 2xx with non-HTML Content-Type | `NotHtml` |
/// | Non-2xx status | `HttpError` |
/// | Timeout, DNS, connect, TLS failure | `NetworkError` |
///
/// A missing Content-Type header is treated as HTML, best effort.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.contains("text/html") {
        return FetchResult::NotHtml { content_type };
    }

    let final_url = response.url().clone();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let result = fetch_url(&client, &format!("{}/page", server.uri())).await;

        match result {
            FetchResult::Success {
                status_code, body, ..
            } => {
                assert_eq!(status_code, 200);
                assert!(body.contains("hi"));
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_404_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let result = fetch_url(&client, &format!("{}/missing", server.uri())).await;

        assert!(matches!(
            result,
            FetchResult::HttpError { status_code: 404 }
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_html_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let result = fetch_url(&client, &format!("{}/data.json", server.uri())).await;

        match result {
            FetchResult::NotHtml { content_type } => {
                assert!(content_type.contains("application/json"));
            }
            other => panic!("expected NotHtml, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_network_error() {
        let client = build_http_client().unwrap();
        // Reserved port on localhost with nothing listening.
        let result = fetch_url(&client, "http://127.0.0.1:1/").await;

        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect_and_reports_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/new", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let client = build_http_client().unwrap();
        let result = fetch_url(&client, &format!("{}/old", server.uri())).await;

        match result {
            FetchResult::Success { final_url, .. } => {
                assert!(final_url.as_str().ends_with("/new"));
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }
}
