//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::ShortenOutcome;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::{build_short_url, short_url_base};

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://github.com/" }
/// ```
///
/// # Response
///
/// The URL is stored in canonical form, so spellings that parse to the same
/// URL share one key.
///
/// `201 Created` for a new mapping, `200 OK` if the URL was shortened before:
///
/// ```json
/// {
///   "result": "http://localhost:8080/s/abcabc1234567890",
///   "key": "abcabc1234567890",
///   "message": "URL successfully shortened"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON or a URL that fails acceptance checks.
/// Returns 500 Internal Server Error if no free key was found or the store failed.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request("Invalid JSON payload", json!({ "reason": e.body_text() }))
    })?;

    payload.validate()?;
    let original_url = state.validator.check(&payload.url).await?;

    let base = short_url_base(state.base_url.as_deref(), &headers)?;
    let shortened = state.engine.shorten(original_url.as_str()).await?;

    let (status, message) = match shortened.outcome {
        ShortenOutcome::Created => (StatusCode::CREATED, "URL successfully shortened"),
        ShortenOutcome::AlreadyExists => (StatusCode::OK, "URL is already shortened"),
    };

    Ok((
        status,
        Json(ShortenResponse {
            result: build_short_url(&base, &shortened.key),
            key: shortened.key,
            message: message.to_string(),
        }),
    ))
}
