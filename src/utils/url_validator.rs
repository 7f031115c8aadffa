//! Acceptance checks for URLs submitted for shortening.
//!
//! A URL is accepted when it is non-empty, at most [`MAX_URL_LENGTH`]
//! characters, an absolute `http`/`https` URL with a host, and (optionally)
//! answers a GET request with a 2xx status.
//!
//! Accepted URLs are returned in their canonical serialization, which is the
//! form that gets stored: surrounding whitespace and embedded tabs or newlines
//! are dropped, and the host is lowercased.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Maximum accepted URL length in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a URL is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlRejection {
    #[error("Missing url in the request payload")]
    Missing,

    #[error("Invalid URL")]
    Invalid,

    #[error("URL exceeds the maximum length of {} characters", MAX_URL_LENGTH)]
    TooLong,

    #[error("The URL was not reachable")]
    Unreachable,
}

/// Decides whether a URL may be shortened.
#[async_trait]
pub trait UrlValidator: Send + Sync {
    /// Returns the canonical form of an acceptable URL.
    ///
    /// # Errors
    ///
    /// Returns the first [`UrlRejection`] the URL fails.
    async fn check(&self, url: &str) -> Result<Url, UrlRejection>;
}

/// Checks everything except reachability and returns the parsed URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(check_syntax(" https://GitHub.com ").unwrap().as_str(), "https://github.com/");
/// assert_eq!(check_syntax("  "), Err(UrlRejection::Missing));
/// assert_eq!(check_syntax("ftp://example.com"), Err(UrlRejection::Invalid));
/// ```
pub fn check_syntax(url: &str) -> Result<Url, UrlRejection> {
    if url.trim().is_empty() {
        return Err(UrlRejection::Missing);
    }

    if url.chars().count() > MAX_URL_LENGTH {
        return Err(UrlRejection::TooLong);
    }

    let parsed = Url::parse(url).map_err(|_| UrlRejection::Invalid)?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlRejection::Invalid),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlRejection::Invalid);
    }

    // Percent-encoding can grow the input past the limit.
    if parsed.as_str().chars().count() > MAX_URL_LENGTH {
        return Err(UrlRejection::TooLong);
    }

    Ok(parsed)
}

/// Validator that optionally probes the URL over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUrlValidator {
    client: Option<reqwest::Client>,
}

impl HttpUrlValidator {
    /// Creates a validator that also requires a 2xx response within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. TLS backend failure).
    pub fn with_reachability(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client: Some(client),
        })
    }

    /// Creates a validator that never touches the network.
    pub fn syntax_only() -> Self {
        Self { client: None }
    }

    pub fn checks_reachability(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl UrlValidator for HttpUrlValidator {
    async fn check(&self, url: &str) -> Result<Url, UrlRejection> {
        let parsed = check_syntax(url)?;

        let Some(client) = &self.client else {
            return Ok(parsed);
        };

        match client.get(parsed.clone()).send().await {
            Ok(response) if response.status().is_success() => Ok(parsed),
            Ok(response) => {
                debug!(url = %url, status = %response.status(), "URL probe returned non-success");
                Err(UrlRejection::Unreachable)
            }
            Err(e) => {
                debug!(url = %url, error = %e, "URL probe failed");
                Err(UrlRejection::Unreachable)
            }
        }
    }
}
