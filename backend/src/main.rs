//! Main entry point for the authentication web server.
//!
//! This file initializes logging, loads configuration, opens the credential
//! store, and serves the page and authentication routes behind the session
//! middleware.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use anyhow::Context;
use auth::middleware::session_auth;
use auth::service::AuthSettings;
use axum::{Extension, Router, middleware};
use config::Config;
use database::Database;
use sqlx::SqlitePool;
use tracing::info;
use tracing_subscriber::fmt::init;

/// Builds the application router.
///
/// Extensions are layered outside the session middleware so it can read the
/// auth settings.
pub fn build_router(pool: SqlitePool, settings: AuthSettings) -> Router {
    Router::new()
        .merge(api::home::routes::home_router())
        .merge(auth::routes::auth_router())
        .layer(middleware::from_fn(session_auth))
        .layer(Extension(settings))
        .layer(Extension(pool))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let db = Database::new(&config).await?;
    let settings = AuthSettings::from_config(&config);

    let app = build_router(db.pool().clone(), settings);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
