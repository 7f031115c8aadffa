//! HTTP-facing error type.
//!
//! Domain errors convert into [`AppError`], which renders as
//! `{"error": {"code", "message", "details"}}` with a matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::{ResolveError, ShortenError};
use crate::domain::repositories::StoreError;
use crate::utils::url_validator::UrlRejection;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UrlRejection> for AppError {
    fn from(e: UrlRejection) -> Self {
        AppError::bad_request(e.to_string(), json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let field_errors = e.field_errors();
        let fields: Vec<String> = field_errors.keys().map(|k| k.to_string()).collect();
        let message = field_errors
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request payload".to_string());

        AppError::bad_request(message, json!({ "fields": fields }))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            ShortenError::KeySpaceExhausted { attempts } => AppError::internal(
                "Failed to create the shortened URL",
                json!({ "reason": "Too many key collisions", "attempts": attempts }),
            ),
            ShortenError::Store(e) => e.into(),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidKeyShape(key) => {
                AppError::bad_request("Invalid URL key", json!({ "key": key }))
            }
            ResolveError::NotFound(key) => {
                AppError::not_found("Shortened URL not found", json!({ "key": key }))
            }
            ResolveError::ClickNotRecorded { source, .. } => source.into(),
            ResolveError::Store(e) => e.into(),
        }
    }
}
