//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ShortenerStore`] - Key-to-URL mappings and click counters

pub mod shortener_store;

pub use shortener_store::{ShortenerStore, StoreError, UniqueField};

#[cfg(test)]
pub use shortener_store::MockShortenerStore;
