//! Utility functions for key generation, URL acceptance, and database errors.
//!
//! - [`key_generator`] - Random key generation and key shape validation
//! - [`url_validator`] - URL acceptance checks (syntax, length, reachability)
//! - [`db_error`] - PostgreSQL unique-violation classification
//! - [`short_url`] - Public short URL construction

pub mod db_error;
pub mod key_generator;
pub mod short_url;
pub mod url_validator;
