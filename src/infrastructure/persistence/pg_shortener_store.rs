//! PostgreSQL implementation of the shortener store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl};
use crate::domain::repositories::{ShortenerStore, StoreError};
use crate::utils::db_error::map_insert_error;

/// PostgreSQL store for URL mappings.
///
/// Uniqueness of `shortened_url_key` and `original_url` is enforced by table
/// constraints; each method issues a single statement.
pub struct PgShortenerStore {
    pool: Arc<PgPool>,
}

impl PgShortenerStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortenerStore for PgShortenerStore {
    async fn get_by_key(&self, key: &str) -> Result<Option<ShortenedUrl>, StoreError> {
        let record = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            SELECT original_url, shortened_url_key, clicks
            FROM urls
            WHERE shortened_url_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn get_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortenedUrl>, StoreError> {
        let record = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            SELECT original_url, shortened_url_key, clicks
            FROM urls
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn increase_clicks(&self, key: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE shortened_url_key = $1")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(key.to_string()));
        }

        Ok(())
    }

    async fn insert(&self, new_url: NewShortenedUrl) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO urls (original_url, shortened_url_key, clicks)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&new_url.original_url)
        .bind(&new_url.key)
        .bind(new_url.clicks)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }
}
