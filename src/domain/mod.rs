//! Domain layer containing business entities and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions and their error taxonomy
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on the HTTP layer
//! - Uniqueness of keys and URLs is enforced by the store, never in-process
//! - Business logic lives in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
