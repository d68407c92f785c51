//! Blocking HTTP fetch for document sources.
//!
//! The loader accepts `http://` and `https://` URLs in addition to file
//! paths; this module owns the single GET wrapper it needs.

use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = "minnow/0.1 (headless layout engine)";

/// Request timeout applied to every fetch.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes of [`fetch_text`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(reqwest::Error),
    /// The request itself failed (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    /// The response body could not be decoded as text.
    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),
}

/// Fetch a URL and return its body as text.
///
/// # Errors
/// Returns a [`FetchError`] if the client cannot be built, the request
/// fails, the status is non-success, or the body cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(FetchError::Request)?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    response.text().map_err(FetchError::Body)
}
