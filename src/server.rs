//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, wires services into [`AppState`], and runs the
//! Axum server until Ctrl-C or SIGTERM.

use crate::application::services::{AuthService, LinkResolver, LinkService};
use crate::config::{Config, StorageBackend, mask_connection_string};
use crate::domain::repositories::{AccountRepository, LinkRepository};
use crate::infrastructure::auth::JwtAuthority;
use crate::infrastructure::persistence::{
    MemoryAccountRepository, MemoryLinkRepository, PgAccountRepository, PgLinkRepository,
};
use crate::infrastructure::qr::SvgQrRenderer;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::slug_generator::RandomSlugGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts before startup gives up.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Repositories for the configured backend.
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub accounts: Arc<dyn AccountRepository>,
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL with migrations, or in-memory)
/// - Link, resolver and auth services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repositories = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_database(&config).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");

            let pool = Arc::new(pool);
            Repositories {
                links: Arc::new(PgLinkRepository::new(pool.clone())),
                accounts: Arc::new(PgAccountRepository::new(pool)),
            }
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            Repositories {
                links: Arc::new(MemoryLinkRepository::new()),
                accounts: Arc::new(MemoryAccountRepository::new()),
            }
        }
    };

    let state = build_state(&config, repositories);
    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wires services around the given repositories.
pub fn build_state(config: &Config, repositories: Repositories) -> AppState {
    let authority = Arc::new(JwtAuthority::new(&config.jwt_secret, config.jwt_expiry_hours));

    let link_service = Arc::new(LinkService::new(
        repositories.links.clone(),
        Arc::new(RandomSlugGenerator),
        config.slug_length,
        config.base_url.clone(),
    ));
    let resolver = Arc::new(LinkResolver::new(repositories.links));
    let auth_service = Arc::new(AuthService::new(
        repositories.accounts,
        authority.clone(),
        authority,
    ));

    AppState::new(
        link_service,
        resolver,
        auth_service,
        Arc::new(SvgQrRenderer),
        config.fallback_url.as_str(),
    )
}

/// Connects to PostgreSQL, retrying with exponential backoff.
///
/// The database often starts alongside the service, so early refusals are
/// expected.
async fn connect_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(200)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(DB_CONNECT_ATTEMPTS - 1);

    let pool = Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!(error = %e, "Database connection failed, retrying");
            })
        }
    })
    .await
    .with_context(|| {
        format!(
            "Failed to connect to {} after {DB_CONNECT_ATTEMPTS} attempts",
            mask_connection_string(database_url)
        )
    })?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
