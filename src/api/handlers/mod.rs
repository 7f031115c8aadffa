//! HTTP request handlers for API endpoints.

pub mod ping;
pub mod redirect;
pub mod shorten;

pub use ping::ping_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
