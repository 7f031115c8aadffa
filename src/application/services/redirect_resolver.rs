//! Key resolution with click accounting.

use std::sync::Arc;

use tracing::debug;

use crate::domain::repositories::{ShortenerStore, StoreError};
use crate::utils::key_generator::is_valid_key_shape;

/// Errors returned by [`RedirectResolver::resolve`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("malformed short key: {0}")]
    InvalidKeyShape(String),

    #[error("short key not found: {0}")]
    NotFound(String),

    /// The mapping exists but its click counter could not be incremented.
    ///
    /// `original_url` is still valid; callers may redirect anyway.
    #[error("failed to record click for {original_url}: {source}")]
    ClickNotRecorded {
        original_url: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves short keys back to their original URLs, counting each resolution.
pub struct RedirectResolver<S: ShortenerStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ShortenerStore + ?Sized> RedirectResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the original URL for `key` and increments its click counter.
    ///
    /// Malformed keys are rejected without a store round-trip.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidKeyShape`] if `key` cannot be a generated key
    /// - [`ResolveError::NotFound`] if no mapping has this key
    /// - [`ResolveError::ClickNotRecorded`] if the lookup succeeded but the
    ///   counter update failed
    /// - [`ResolveError::Store`] if the lookup itself failed
    pub async fn resolve(&self, key: &str) -> Result<String, ResolveError> {
        if !is_valid_key_shape(key) {
            return Err(ResolveError::InvalidKeyShape(key.to_string()));
        }

        let record = self
            .store
            .get_by_key(key)
            .await?
            .ok_or_else(|| ResolveError::NotFound(key.to_string()))?;

        if let Err(source) = self.store.increase_clicks(key).await {
            return Err(ResolveError::ClickNotRecorded {
                original_url: record.original_url,
                source,
            });
        }

        debug!(key = %key, clicks = record.clicks + 1, "Resolved short key");

        Ok(record.original_url)
    }
}
