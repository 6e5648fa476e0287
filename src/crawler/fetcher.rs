//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests for page content
//! - Content-Type gating (only HTML bodies are parsed)
//! - Error classification into typed crawl errors

use crate::CrawlError;
use reqwest::Client;
use std::time::Duration;

/// Outcome of fetching a single page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects, used as the base for resolving links
    pub final_url: String,

    /// Page body, present only for HTML responses
    ///
    /// Non-HTML content (images, PDFs, ...) yields `None`: such pages
    /// contribute no words and no links but are not an error.
    pub body: Option<String>,
}

/// Builds the HTTP client shared by all crawl tasks
///
/// reqwest clients are internally pooled and safe to call concurrently
/// from any number of tasks, which is all the parser interface requires.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its HTML body
///
/// A fetch that cannot produce a page aborts the whole crawl; URLs are
/// never silently skipped.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(FetchedPage)` - Response received; `body` is `None` for non-HTML content
/// * `Err(CrawlError)` - Network failure, timeout, or non-success status
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, CrawlError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            CrawlError::Timeout {
                url: url.to_string(),
            }
        } else {
            CrawlError::Http {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.contains("text/html") {
        tracing::debug!("Skipping non-HTML content at {}: {}", url, content_type);
        return Ok(FetchedPage {
            final_url,
            body: None,
        });
    }

    let body = response.text().await.map_err(|e| CrawlError::Http {
        url: url.to_string(),
        source: e,
    })?;

    Ok(FetchedPage {
        final_url,
        body: Some(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client();
        assert!(client.is_ok());
    }

    // Fetch behavior against live responses is covered by the wiremock
    // integration tests in tests/crawl_tests.rs
}
