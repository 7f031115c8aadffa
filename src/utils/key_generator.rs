//! Short key generation and shape validation.
//!
//! Keys are [`URL_KEY_LENGTH`] characters drawn uniformly from a 62-symbol
//! alphanumeric alphabet. The generator does not check uniqueness: the store
//! rejects duplicate keys and the shortening engine retries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of characters in every generated key.
pub const URL_KEY_LENGTH: usize = 16;

/// Alphabet keys are drawn from.
pub const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Compiled regex for key shape validation. Must agree with [`CHARSET`] and [`URL_KEY_LENGTH`].
static KEY_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{16}$").unwrap());

/// Source of freshly seeded random number generators.
///
/// Every call to [`KeyGenerator::generate`] asks the provider for a new RNG, so
/// concurrent callers never share generator state.
pub trait RandomnessProvider: Send + Sync {
    type Source: Rng;

    fn fresh_rng(&self) -> Self::Source;
}

/// Seeds each RNG from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomness;

impl RandomnessProvider for OsRandomness {
    type Source = StdRng;

    fn fresh_rng(&self) -> StdRng {
        StdRng::from_os_rng()
    }
}

/// Deterministic provider for reproducible key sequences.
///
/// [`SeededRandomness::new`] seeds the n-th RNG with `seed + n`, yielding a
/// different but repeatable key on every call. [`SeededRandomness::constant`]
/// reuses the same seed forever, so every generated key is identical.
#[derive(Debug)]
pub struct SeededRandomness {
    seed: u64,
    step: u64,
    calls: AtomicU64,
}

impl SeededRandomness {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            step: 1,
            calls: AtomicU64::new(0),
        }
    }

    pub fn constant(seed: u64) -> Self {
        Self {
            seed,
            step: 0,
            calls: AtomicU64::new(0),
        }
    }
}

impl RandomnessProvider for SeededRandomness {
    type Source = StdRng;

    fn fresh_rng(&self) -> StdRng {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        StdRng::seed_from_u64(self.seed.wrapping_add(n.wrapping_mul(self.step)))
    }
}

/// Generates random short keys.
#[derive(Debug, Default)]
pub struct KeyGenerator<P = OsRandomness> {
    provider: P,
}

impl KeyGenerator<OsRandomness> {
    /// Creates a generator backed by OS entropy.
    pub fn new() -> Self {
        Self {
            provider: OsRandomness,
        }
    }
}

impl<P: RandomnessProvider> KeyGenerator<P> {
    /// Creates a generator backed by the given randomness provider.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Generates a new random key.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let key = KeyGenerator::new().generate();
    /// assert_eq!(key.len(), URL_KEY_LENGTH);
    /// assert!(is_valid_key_shape(&key));
    /// ```
    pub fn generate(&self) -> String {
        let mut rng = self.provider.fresh_rng();

        (0..URL_KEY_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}

/// Returns true if `key` has the length and alphabet of a generated key.
///
/// This only rejects malformed input; it says nothing about whether the key exists.
pub fn is_valid_key_shape(key: &str) -> bool {
    KEY_SHAPE_REGEX.is_match(key)
}
