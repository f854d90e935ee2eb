//! Page retrieval from the wiki or from local files.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::{Client, StatusCode};
#[cfg(feature = "fetch")]
use tracing::debug;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{Result, ScpError};

/// HTTP client configuration for fetching entry pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; ScpReader/1.0)".to_string() }
    }
}

/// Fetches an entry page.
///
/// A 404 answer is reported as [`ScpError::NotFound`] so callers can tell a
/// missing entry from a failed request.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| ScpError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(ScpError::InvalidUrl(format!("unsupported scheme: {}", parsed_url.scheme())));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(ScpError::HttpError)?;

    debug!(%url, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { ScpError::Timeout { timeout: config.timeout } } else { ScpError::HttpError(e) }
        })?;

    match response.status() {
        StatusCode::OK => Ok(response.text().await?),
        StatusCode::NOT_FOUND => Err(ScpError::NotFound { url: url.to_string() }),
        status => Err(ScpError::HttpStatus { status: status.as_u16(), url: url.to_string() }),
    }
}

/// Reads a saved HTML page from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(ScpError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(ScpError::from)
    }
}
