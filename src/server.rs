//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::{
    PgInterestRepository, PgProfileRepository, PgProjectRepository, PgSessionRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Repositories, ServiceSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the connection pool using the configured limits.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds application state over PostgreSQL repositories.
pub fn build_state(pool: PgPool, config: &Config) -> AppState {
    let pool = Arc::new(pool);

    let repositories = Repositories {
        profiles: Arc::new(PgProfileRepository::new(pool.clone())),
        projects: Arc::new(PgProjectRepository::new(pool.clone())),
        interests: Arc::new(PgInterestRepository::new(pool.clone())),
        sessions: Arc::new(PgSessionRepository::new(pool)),
    };

    AppState::new(
        repositories,
        ServiceSettings {
            session_signing_secret: config.session_signing_secret.clone(),
            sponsorship_strategy: config.sponsorship_strategy,
            sponsorship_concurrency: config.sponsorship_concurrency,
            store_timeout: config.store_timeout(),
            cookie_secure: config.cookie_secure,
        },
    )
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if the database connection, migrations or the listener
/// bind fail, or the server stops with an error.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let state = build_state(pool, &config);
    tracing::info!(
        strategy = %config.sponsorship_strategy,
        concurrency = config.sponsorship_concurrency,
        "Sponsorship filter ready"
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
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

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
