//! Business logic services for the application layer.

pub mod redirect_resolver;
pub mod shortening_engine;

pub use redirect_resolver::{RedirectResolver, ResolveError};
pub use shortening_engine::{
    RetryPolicy, ShortenError, ShortenOutcome, Shortened, ShorteningEngine,
};
