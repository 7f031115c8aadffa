#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use url_keeper::api::handlers::{ping_handler, redirect_handler, shorten_handler};
use url_keeper::application::services::RetryPolicy;
use url_keeper::domain::entities::{NewShortenedUrl, ShortenedUrl};
use url_keeper::domain::repositories::{ShortenerStore, StoreError};
use url_keeper::infrastructure::persistence::InMemoryShortenerStore;
use url_keeper::state::AppState;
use url_keeper::utils::url_validator::HttpUrlValidator;

pub const TEST_BASE_URL: &str = "http://s.test";

pub fn test_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 5,
        backoff: Duration::ZERO,
    }
}

/// State backed by an in-memory store, without network probes.
pub fn create_test_state(store: Arc<InMemoryShortenerStore>) -> AppState {
    create_test_state_with_base(store, Some(TEST_BASE_URL.to_string()))
}

pub fn create_test_state_with_base(
    store: Arc<InMemoryShortenerStore>,
    base_url: Option<String>,
) -> AppState {
    create_test_state_for_store(store, base_url)
}

pub fn create_test_state_for_store(
    store: Arc<dyn ShortenerStore>,
    base_url: Option<String>,
) -> AppState {
    AppState::new(
        store,
        Arc::new(HttpUrlValidator::syntax_only()),
        test_policy(),
        base_url,
    )
}

pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/shorten", post(shorten_handler))
        .route("/s/{key}", get(redirect_handler))
        .with_state(state)
}

/// In-memory store whose click counter updates always fail.
#[derive(Default)]
pub struct FailingClicksStore {
    inner: InMemoryShortenerStore,
}

#[async_trait]
impl ShortenerStore for FailingClicksStore {
    async fn get_by_key(&self, key: &str) -> Result<Option<ShortenedUrl>, StoreError> {
        self.inner.get_by_key(key).await
    }

    async fn get_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortenedUrl>, StoreError> {
        self.inner.get_by_original_url(original_url).await
    }

    async fn increase_clicks(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, new_url: NewShortenedUrl) -> Result<(), StoreError> {
        self.inner.insert(new_url).await
    }
}
