//! Shortener store implementations.
//!
//! # Stores
//!
//! - [`PgShortenerStore`] - PostgreSQL, uniqueness enforced by table constraints
//! - [`InMemoryShortenerStore`] - single-process store with the same error contract

pub mod memory_shortener_store;
pub mod pg_shortener_store;

pub use memory_shortener_store::InMemoryShortenerStore;
pub use pg_shortener_store::PgShortenerStore;
