//! Key allocation for long URLs.

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

use crate::domain::entities::NewShortenedUrl;
use crate::domain::repositories::{ShortenerStore, StoreError, UniqueField};
use crate::utils::key_generator::{KeyGenerator, OsRandomness, RandomnessProvider};

/// Default number of insert attempts before giving up on key collisions.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Default pause between insert attempts after a key collision.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// How many times a colliding key is replaced, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total insert attempts, including the first one. Must be at least 1.
    pub max_attempts: usize,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

/// Whether a call to [`ShorteningEngine::shorten`] allocated a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenOutcome {
    Created,
    AlreadyExists,
}

/// Key assigned to a URL together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    pub key: String,
    pub outcome: ShortenOutcome,
}

/// Errors returned by [`ShorteningEngine::shorten`].
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("no free key found after {attempts} attempts")]
    KeySpaceExhausted { attempts: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Allocates short keys for validated URLs.
///
/// The store's uniqueness constraints decide every race: a URL that is
/// already stored yields its existing key, and a key that is already taken is
/// replaced by a freshly generated one, up to [`RetryPolicy::max_attempts`]
/// inserts in total. Nothing is cached between calls.
pub struct ShorteningEngine<S: ShortenerStore + ?Sized, P = OsRandomness> {
    store: Arc<S>,
    generator: KeyGenerator<P>,
    policy: RetryPolicy,
}

impl<S: ShortenerStore + ?Sized> ShorteningEngine<S, OsRandomness> {
    /// Creates an engine with OS-seeded keys and the default retry policy.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_generator(store, KeyGenerator::new())
    }
}

impl<S: ShortenerStore + ?Sized, P: RandomnessProvider> ShorteningEngine<S, P> {
    /// Creates an engine with a custom key generator and the default retry policy.
    pub fn with_generator(store: Arc<S>, generator: KeyGenerator<P>) -> Self {
        Self {
            store,
            generator,
            policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy. `max_attempts` is clamped to at least 1.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = RetryPolicy {
            max_attempts: policy.max_attempts.max(1),
            backoff: policy.backoff,
        };
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Returns the key for `original_url`, allocating one if the URL is new.
    ///
    /// The URL must already have passed acceptance checks.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::KeySpaceExhausted`] if every attempt collided
    /// with an existing key; no mapping is created in that case.
    /// Returns [`ShortenError::Store`] on any other store error.
    pub async fn shorten(&self, original_url: &str) -> Result<Shortened, ShortenError> {
        let strategy =
            FixedInterval::new(self.policy.backoff).take(self.policy.max_attempts - 1);

        let inserted = RetryIf::start(
            strategy,
            || self.try_insert(original_url),
            |err: &StoreError| {
                if err.is_key_collision() {
                    warn!(url = %original_url, "Generated key already taken, retrying");
                    true
                } else {
                    false
                }
            },
        )
        .await;

        match inserted {
            Ok(key) => {
                info!(key = %key, url = %original_url, "Created short key");
                Ok(Shortened {
                    key,
                    outcome: ShortenOutcome::Created,
                })
            }
            Err(StoreError::UniqueViolation(UniqueField::OriginalUrl)) => {
                let existing = self
                    .store
                    .get_by_original_url(original_url)
                    .await?
                    .ok_or_else(|| StoreError::NotFound(original_url.to_string()))?;

                debug!(key = %existing.key, url = %original_url, "URL already shortened");
                Ok(Shortened {
                    key: existing.key,
                    outcome: ShortenOutcome::AlreadyExists,
                })
            }
            Err(err) if err.is_key_collision() => {
                warn!(
                    url = %original_url,
                    attempts = self.policy.max_attempts,
                    "Giving up after repeated key collisions"
                );
                Err(ShortenError::KeySpaceExhausted {
                    attempts: self.policy.max_attempts,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Generates one candidate key and tries to store it.
    async fn try_insert(&self, original_url: &str) -> Result<String, StoreError> {
        let key = self.generator.generate();

        self.store
            .insert(NewShortenedUrl::fresh(original_url, key.clone()))
            .await?;

        Ok(key)
    }
}
