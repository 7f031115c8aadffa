//! Shortened URL entity representing a key-to-URL mapping.

/// A persisted mapping between a short key and the original URL.
///
/// Records are created once and never deleted; `clicks` is the only field that
/// changes after insertion, and it only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortenedUrl {
    pub original_url: String,
    #[sqlx(rename = "shortened_url_key")]
    pub key: String,
    pub clicks: i64,
}

impl ShortenedUrl {
    /// Creates a new ShortenedUrl instance.
    pub fn new(original_url: String, key: String, clicks: i64) -> Self {
        Self {
            original_url,
            key,
            clicks,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortenedUrl {
    pub original_url: String,
    pub key: String,
    pub clicks: i64,
}

impl NewShortenedUrl {
    /// A fresh mapping with a zero click counter.
    pub fn fresh(original_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            key: key.into(),
            clicks: 0,
        }
    }
}

impl From<NewShortenedUrl> for ShortenedUrl {
    fn from(new: NewShortenedUrl) -> Self {
        Self::new(new.original_url, new.key, new.clicks)
    }
}
