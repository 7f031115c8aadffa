//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`ShortenedUrl`] - A persisted key-to-URL mapping with its click counter
//! - [`NewShortenedUrl`] - Input for creating a mapping

pub mod shortened_url;

pub use shortened_url::{NewShortenedUrl, ShortenedUrl};
