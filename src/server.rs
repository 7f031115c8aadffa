//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, migrations, URL validator setup and the Axum
//! server lifecycle.

use crate::application::services::RetryPolicy;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::ShortenerStore;
use crate::infrastructure::persistence::{InMemoryShortenerStore, PgShortenerStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::url_validator::{HttpUrlValidator, UrlValidator};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - the selected mapping store (PostgreSQL pool plus migrations, or in-memory)
/// - the URL validator, with or without the reachability probe
/// - the Axum HTTP server, which stops on Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The HTTP client for reachability probes cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let validator = build_validator(&config)?;
    let policy: RetryPolicy = config.retry_policy();

    let state = AppState::new(store, validator, policy, config.base_url.clone());
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn ShortenerStore>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            Ok(Arc::new(PgShortenerStore::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; mappings are lost on restart");
            Ok(Arc::new(InMemoryShortenerStore::new()))
        }
    }
}

fn build_validator(config: &Config) -> Result<Arc<dyn UrlValidator>> {
    if !config.check_reachability {
        tracing::info!("URL reachability check disabled");
        return Ok(Arc::new(HttpUrlValidator::syntax_only()));
    }

    let validator = HttpUrlValidator::with_reachability(Duration::from_secs(
        config.reachability_timeout_secs,
    ))
    .context("Failed to build HTTP client for reachability checks")?;

    Ok(Arc::new(validator))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
