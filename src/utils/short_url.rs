//! Construction of public short URLs from keys.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Path segment under which short keys are served.
pub const SHORT_PATH_PREFIX: &str = "/s/";

/// Determines the public base (`scheme://host[:port]`) for short URLs.
///
/// A configured `base_url` wins. Otherwise the `Host` header is used as-is,
/// port included, with the `http` scheme since the service does not terminate TLS.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base is configured and the `Host`
/// header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:8080".parse().unwrap());
///
/// assert_eq!(short_url_base(None, &headers).unwrap(), "http://localhost:8080");
/// assert_eq!(short_url_base(Some("https://s.example.com/"), &headers).unwrap(), "https://s.example.com");
/// ```
pub fn short_url_base(base_url: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = base_url {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?;

    Ok(format!("http://{host}"))
}

/// Joins a base and a key into the full short URL.
pub fn build_short_url(base: &str, key: &str) -> String {
    format!("{}{}{}", base.trim_end_matches('/'), SHORT_PATH_PREFIX, key)
}
