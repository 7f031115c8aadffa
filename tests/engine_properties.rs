mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url_keeper::application::services::{
    RedirectResolver, RetryPolicy, ShortenError, ShortenOutcome, ShorteningEngine,
};
use url_keeper::domain::entities::NewShortenedUrl;
use url_keeper::domain::repositories::ShortenerStore;
use url_keeper::infrastructure::persistence::InMemoryShortenerStore;
use url_keeper::utils::key_generator::{
    KeyGenerator, SeededRandomness, URL_KEY_LENGTH, is_valid_key_shape,
};

#[tokio::test]
async fn test_concurrent_shortening_of_same_url_creates_one_mapping() {
    let store = Arc::new(InMemoryShortenerStore::new());
    let engine = Arc::new(ShorteningEngine::new(store.clone()).with_policy(common::test_policy()));

    let mut handles = Vec::new();
    for _ in 0..32 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.shorten("https://github.com/").await
        }));
    }

    let mut keys = HashSet::new();
    let mut created = 0;
    for handle in handles {
        let shortened = handle.await.unwrap().unwrap();
        if shortened.outcome == ShortenOutcome::Created {
            created += 1;
        }
        keys.insert(shortened.key);
    }

    assert_eq!(created, 1);
    assert_eq!(keys.len(), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_distinct_urls_get_distinct_keys() {
    let store = Arc::new(InMemoryShortenerStore::new());
    let engine = ShorteningEngine::new(store.clone()).with_policy(common::test_policy());

    let mut keys = HashSet::new();
    for i in 0..200 {
        let shortened = engine
            .shorten(&format!("https://example.com/page/{i}"))
            .await
            .unwrap();

        assert_eq!(shortened.outcome, ShortenOutcome::Created);
        assert_eq!(shortened.key.len(), URL_KEY_LENGTH);
        assert!(is_valid_key_shape(&shortened.key));
        keys.insert(shortened.key);
    }

    assert_eq!(keys.len(), 200);
    assert_eq!(store.len(), 200);
}

#[tokio::test]
async fn test_shorten_then_resolve_round_trip() {
    let store = Arc::new(InMemoryShortenerStore::new());
    let engine = ShorteningEngine::new(store.clone()).with_policy(common::test_policy());
    let resolver = RedirectResolver::new(store.clone());

    let url = "https://docs.rs/tokio/latest/tokio/?search=spawn#examples";
    let shortened = engine.shorten(url).await.unwrap();

    assert_eq!(resolver.resolve(&shortened.key).await.unwrap(), url);
}

#[tokio::test]
async fn test_clicks_increase_by_one_per_resolution() {
    let store = Arc::new(InMemoryShortenerStore::new());
    let engine = ShorteningEngine::new(store.clone()).with_policy(common::test_policy());
    let resolver = RedirectResolver::new(store.clone());

    let key = engine.shorten("https://github.com/").await.unwrap().key;
    assert_eq!(store.get_by_key(&key).await.unwrap().unwrap().clicks, 0);

    for expected in 1..=5 {
        resolver.resolve(&key).await.unwrap();
        let record = store.get_by_key(&key).await.unwrap().unwrap();
        assert_eq!(record.clicks, expected);
    }

    // Shortening again must not reset the counter.
    let again = engine.shorten("https://github.com/").await.unwrap();
    assert_eq!(again.outcome, ShortenOutcome::AlreadyExists);
    assert_eq!(store.get_by_key(&key).await.unwrap().unwrap().clicks, 5);
}

#[tokio::test]
async fn test_concurrent_resolutions_lose_no_clicks() {
    let store = Arc::new(InMemoryShortenerStore::new());
    let engine = ShorteningEngine::new(store.clone()).with_policy(common::test_policy());
    let resolver = Arc::new(RedirectResolver::new(store.clone()));

    let key = engine.shorten("https://github.com/").await.unwrap().key;

    let mut handles = Vec::new();
    for _ in 0..50 {
        let resolver = resolver.clone();
        let key = key.clone();
        handles.push(tokio::spawn(async move { resolver.resolve(&key).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get_by_key(&key).await.unwrap().unwrap().clicks, 50);
}

#[tokio::test]
async fn test_exhausted_key_space_creates_no_mapping() {
    let store = Arc::new(InMemoryShortenerStore::new());

    // Occupy the only key this generator will ever produce.
    let taken = KeyGenerator::with_provider(SeededRandomness::constant(7)).generate();
    store
        .insert(NewShortenedUrl::fresh("https://occupied.example.com/", taken))
        .await
        .unwrap();

    let engine = ShorteningEngine::with_generator(
        store.clone(),
        KeyGenerator::with_provider(SeededRandomness::constant(7)),
    )
    .with_policy(RetryPolicy {
        max_attempts: 5,
        backoff: Duration::ZERO,
    });

    let err = engine.shorten("https://github.com/").await.unwrap_err();

    assert!(matches!(err, ShortenError::KeySpaceExhausted { attempts: 5 }));
    assert_eq!(store.len(), 1);
    assert!(
        store
            .get_by_original_url("https://github.com/")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_seeded_generator_reaches_fresh_key_after_collision() {
    let store = Arc::new(InMemoryShortenerStore::new());

    // Take the first key of the sequence so the engine has to retry once.
    let first = KeyGenerator::with_provider(SeededRandomness::new(42)).generate();
    store
        .insert(NewShortenedUrl::fresh("https://occupied.example.com/", first.clone()))
        .await
        .unwrap();

    let engine = ShorteningEngine::with_generator(
        store.clone(),
        KeyGenerator::with_provider(SeededRandomness::new(42)),
    )
    .with_policy(common::test_policy());

    let shortened = engine.shorten("https://github.com/").await.unwrap();

    assert_eq!(shortened.outcome, ShortenOutcome::Created);
    assert_ne!(shortened.key, first);
    assert_eq!(store.len(), 2);
}
