//! Liveness probe.

/// Returns `pong`.
///
/// # Endpoint
///
/// `GET /ping`
pub async fn ping_handler() -> &'static str {
    "pong"
}
