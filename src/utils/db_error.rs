//! Translation of PostgreSQL constraint violations into store errors.

use crate::domain::repositories::{StoreError, UniqueField};

/// Constraint guarding `urls.shortened_url_key`.
pub const KEY_CONSTRAINT: &str = "urls_pkey";

/// Constraint guarding `urls.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "urls_original_url_key";

/// Returns which unique column a database error violated, if any.
pub fn unique_violation_field(e: &sqlx::Error) -> Option<UniqueField> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(KEY_CONSTRAINT) => Some(UniqueField::ShortenedKey),
        Some(ORIGINAL_URL_CONSTRAINT) => Some(UniqueField::OriginalUrl),
        _ => None,
    }
}

/// Maps an insert failure to a [`StoreError`], naming the collided column.
pub fn map_insert_error(e: sqlx::Error) -> StoreError {
    match unique_violation_field(&e) {
        Some(field) => StoreError::UniqueViolation(field),
        None => StoreError::Database(e),
    }
}
