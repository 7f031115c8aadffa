//! Storage contract for shortened URL mappings.

use std::fmt;

use async_trait::async_trait;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl};

/// Column whose uniqueness constraint rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    ShortenedKey,
    OriginalUrl,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::ShortenedKey => f.write_str("shortened_url_key"),
            UniqueField::OriginalUrl => f.write_str("original_url"),
        }
    }
}

/// Errors reported by a [`ShortenerStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no mapping found for {0}")]
    NotFound(String),

    #[error("unique constraint violated on {0}")]
    UniqueViolation(UniqueField),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns true if the insert failed because the generated key is taken.
    pub fn is_key_collision(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(UniqueField::ShortenedKey))
    }
}

/// Durable mapping `key -> (original_url, clicks)`.
///
/// Both the key and the original URL are unique across all records, and the
/// backend itself enforces that: callers never lock around these calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortenerStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortenerStore`] - single-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerStore: Send + Sync {
    /// Finds a mapping by its short key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on backend errors.
    async fn get_by_key(&self, key: &str) -> Result<Option<ShortenedUrl>, StoreError>;

    /// Finds a mapping by the URL it points to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on backend errors.
    async fn get_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortenedUrl>, StoreError>;

    /// Increments the click counter of `key` by exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no mapping has this key.
    /// Returns [`StoreError::Database`] on backend errors.
    async fn increase_clicks(&self, key: &str) -> Result<(), StoreError>;

    /// Inserts a new mapping atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] naming the column that collided:
    /// [`UniqueField::ShortenedKey`] when the key is taken by another URL,
    /// [`UniqueField::OriginalUrl`] when the URL is already shortened.
    ///
    /// Returns [`StoreError::Database`] on any other backend error.
    async fn insert(&self, new_url: NewShortenedUrl) -> Result<(), StoreError>;
}
