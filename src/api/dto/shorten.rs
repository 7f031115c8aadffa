//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten. A missing field deserializes as empty and
    /// is rejected by the acceptance checks.
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL exceeds the maximum length of 2048 characters"))]
    pub url: String,
}

/// Response for a successful shortening.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Fully qualified short URL.
    pub result: String,
    pub key: String,
    pub message: String,
}
