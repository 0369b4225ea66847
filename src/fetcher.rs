use crate::config::HttpConfig;
use crate::types::{CuratorError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP fetcher for feeds, article pages and images.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &HttpConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch a URL and return the body text. The body is returned for any
    /// HTTP status; only connection-level failures are errors.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching text from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CuratorError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CuratorError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Fetched {} ({} bytes, status {})", url, body.len(), status);
        Ok(body)
    }

    /// Fetch a URL and return the raw body bytes.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching bytes from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CuratorError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CuratorError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(bytes.to_vec())
    }
}
