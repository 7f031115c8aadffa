//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use serde_json::json;
use tracing::warn;

use crate::application::services::ResolveError;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /s/{key}`
///
/// # Click Tracking
///
/// Every successful resolution increments the key's click counter. If the
/// increment fails the redirect is still served and the failure is logged:
/// availability wins over exact accounting.
///
/// # Errors
///
/// Returns 400 Bad Request if the key is malformed.
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 500 Internal Server Error if the lookup fails or the stored URL is
/// not a valid `Location` value.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = match state.resolver.resolve(&key).await {
        Ok(url) => url,
        Err(ResolveError::ClickNotRecorded {
            original_url,
            source,
        }) => {
            warn!(key = %key, error = %source, "Redirecting without recording click");
            original_url
        }
        Err(e) => return Err(e.into()),
    };

    if HeaderValue::from_str(&original_url).is_err() {
        return Err(AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "key": key }),
        ));
    }

    Ok(Redirect::to(&original_url))
}
