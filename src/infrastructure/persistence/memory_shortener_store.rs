//! Single-process implementation of the shortener store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl};
use crate::domain::repositories::{ShortenerStore, StoreError, UniqueField};

#[derive(Debug, Default)]
struct Tables {
    by_key: HashMap<String, ShortenedUrl>,
    key_by_url: HashMap<String, String>,
}

/// In-memory store holding both unique indexes behind one mutex.
///
/// Each operation runs inside a single critical section, so an insert checks
/// both constraints and writes both indexes atomically, like a table with two
/// unique constraints would. When a new mapping collides on both columns the
/// URL constraint is reported, as the caller then returns the existing key.
#[derive(Debug, Default)]
pub struct InMemoryShortenerStore {
    tables: Mutex<Tables>,
}

impl InMemoryShortenerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // No operation leaves the indexes half-written, so a poisoned lock is still consistent.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ShortenerStore for InMemoryShortenerStore {
    async fn get_by_key(&self, key: &str) -> Result<Option<ShortenedUrl>, StoreError> {
        Ok(self.lock().by_key.get(key).cloned())
    }

    async fn get_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortenedUrl>, StoreError> {
        let tables = self.lock();

        Ok(tables
            .key_by_url
            .get(original_url)
            .and_then(|key| tables.by_key.get(key))
            .cloned())
    }

    async fn increase_clicks(&self, key: &str) -> Result<(), StoreError> {
        let mut tables = self.lock();

        match tables.by_key.get_mut(key) {
            Some(record) => {
                record.clicks += 1;
                Ok(())
            }
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    async fn insert(&self, new_url: NewShortenedUrl) -> Result<(), StoreError> {
        let mut tables = self.lock();

        if tables.key_by_url.contains_key(&new_url.original_url) {
            return Err(StoreError::UniqueViolation(UniqueField::OriginalUrl));
        }
        if tables.by_key.contains_key(&new_url.key) {
            return Err(StoreError::UniqueViolation(UniqueField::ShortenedKey));
        }

        tables
            .key_by_url
            .insert(new_url.original_url.clone(), new_url.key.clone());
        tables
            .by_key
            .insert(new_url.key.clone(), ShortenedUrl::from(new_url));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "abcabc1234567890";

    #[tokio::test]
    async fn insert_and_get_by_key() {
        let store = InMemoryShortenerStore::new();

        store
            .insert(NewShortenedUrl::fresh("https://example.com", KEY))
            .await
            .unwrap();

        let record = store.get_by_key(KEY).await.unwrap().unwrap();
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.key, KEY);
        assert_eq!(record.clicks, 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_by_original_url() {
        let store = InMemoryShortenerStore::new();

        store
            .insert(NewShortenedUrl::fresh("https://example.com", KEY))
            .await
            .unwrap();

        let record = store
            .get_by_original_url("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.key, KEY);

        assert!(
            store
                .get_by_original_url("https://other.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn get_nonexistent_key() {
        let store = InMemoryShortenerStore::new();

        assert!(store.get_by_key("nope").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn insert_reports_key_collision() {
        let store = InMemoryShortenerStore::new();

        store
            .insert(NewShortenedUrl::fresh("https://example.com", KEY))
            .await
            .unwrap();

        let err = store
            .insert(NewShortenedUrl::fresh("https://other.com", KEY))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::UniqueViolation(UniqueField::ShortenedKey)
        ));
        assert!(
            store
                .get_by_original_url("https://other.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn insert_reports_original_url_collision() {
        let store = InMemoryShortenerStore::new();

        store
            .insert(NewShortenedUrl::fresh("https://example.com", KEY))
            .await
            .unwrap();

        let err = store
            .insert(NewShortenedUrl::fresh(
                "https://example.com",
                "zzzzzzzzzzzzzzzz",
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::UniqueViolation(UniqueField::OriginalUrl)
        ));
        assert!(store.get_by_key("zzzzzzzzzzzzzzzz").await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn increase_clicks_counts_each_call() {
        let store = InMemoryShortenerStore::new();

        store
            .insert(NewShortenedUrl::fresh("https://example.com", KEY))
            .await
            .unwrap();

        for _ in 0..3 {
            store.increase_clicks(KEY).await.unwrap();
        }

        assert_eq!(store.get_by_key(KEY).await.unwrap().unwrap().clicks, 3);
    }

    #[tokio::test]
    async fn increase_clicks_on_missing_key() {
        let store = InMemoryShortenerStore::new();

        let err = store.increase_clicks(KEY).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref key) if key == KEY));
    }
}
