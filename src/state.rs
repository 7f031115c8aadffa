//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{RedirectResolver, RetryPolicy, ShorteningEngine};
use crate::domain::repositories::ShortenerStore;
use crate::utils::url_validator::UrlValidator;

/// Services shared by all request handlers.
///
/// The engine and resolver hold the same store; the store is the only shared
/// mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ShorteningEngine<dyn ShortenerStore>>,
    pub resolver: Arc<RedirectResolver<dyn ShortenerStore>>,
    pub validator: Arc<dyn UrlValidator>,
    /// Public base for short URLs; derived from the `Host` header when unset.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ShortenerStore>,
        validator: Arc<dyn UrlValidator>,
        policy: RetryPolicy,
        base_url: Option<String>,
    ) -> Self {
        Self {
            engine: Arc::new(ShorteningEngine::new(store.clone()).with_policy(policy)),
            resolver: Arc::new(RedirectResolver::new(store)),
            validator,
            base_url,
        }
    }
}
