//! Streaming artifact downloader
//!
//! URLs matching the download pattern are fetched here instead of being
//! crawled: the response body is streamed to disk chunk by chunk, never
//! held in memory whole and never parsed for links.

use crate::SiftError;
use reqwest::{Client, Response};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Downloads a URL's response body to the given destination path
///
/// The body is streamed into `<destination>.part` and renamed into place on
/// success, so a failed or interrupted download never leaves a truncated
/// artifact at the destination. The partial file is removed on failure.
///
/// # Errors
///
/// * [`SiftError::Http`] / [`SiftError::HttpStatus`] - transport failure or
///   non-success status
/// * [`SiftError::Io`] - failure writing to disk
///
/// Both are treated as non-fatal by the driver: the failure is reported and
/// the crawl moves on.
pub async fn download(client: &Client, url: &str, destination: &Path) -> Result<(), SiftError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SiftError::Http {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SiftError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let partial = partial_path(destination);
    match stream_body(response, url, &partial).await {
        Ok(()) => {
            tokio::fs::rename(&partial, destination).await?;
            Ok(())
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&partial).await;
            Err(e)
        }
    }
}

/// Streams the response body to a file in fixed-size chunks
async fn stream_body(mut response: Response, url: &str, path: &Path) -> Result<(), SiftError> {
    let mut file = tokio::fs::File::create(path).await?;

    while let Some(chunk) = response.chunk().await.map_err(|e| SiftError::Http {
        url: url.to_string(),
        source: e,
    })? {
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}

/// Returns the temporary path a download is streamed into
fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "download".into());
    name.push(".part");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::build_http_client;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_partial_path_appends_part_suffix() {
        assert_eq!(
            partial_path(Path::new("/out/report.pdf")),
            PathBuf::from("/out/report.pdf.part")
        );
    }

    #[tokio::test]
    async fn test_download_writes_body_to_destination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/file.pdf"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 fake content".to_vec()),
            )
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("file.pdf");
        let client = build_http_client().unwrap();

        download(&client, &format!("{}/file.pdf", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read(&dest).unwrap(),
            b"%PDF-1.4 fake content".to_vec()
        );
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_creates_destination_directory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/file.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("artifacts").join("file.bin");
        let client = build_http_client().unwrap();

        download(&client, &format!("{}/file.bin", server.uri()), &dest)
            .await
            .unwrap();

        assert!(dest.exists());
    }

    #[tokio::test]
    async fn test_download_http_error_leaves_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/gone.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("gone.pdf");
        let client = build_http_client().unwrap();

        let result = download(&client, &format!("{}/gone.pdf", server.uri()), &dest).await;

        assert!(matches!(
            result,
            Err(SiftError::HttpStatus { status: 404, .. })
        ));
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_network_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("never.pdf");
        let client = build_http_client().unwrap();

        let result = download(&client, "http://127.0.0.1:1/never.pdf", &dest).await;

        assert!(matches!(result, Err(SiftError::Http { .. })));
        assert!(!dest.exists());
    }
}
