//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::ShortenerStore`] trait and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shortening_engine::ShorteningEngine`] - Key allocation with collision retry
//! - [`services::redirect_resolver::RedirectResolver`] - Key resolution and click counting

pub mod services;
