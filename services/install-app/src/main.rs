//! HubSpot multi-tenant OAuth install service
//!
//! Single-binary Rust service that:
//! 1. Redirects visitors into HubSpot's authorization flow
//! 2. Exchanges authorization codes and stores per-portal tokens in MongoDB
//! 3. Serves the install-prompt / authenticated landing pages
//! 4. Serves the JSON contacts endpoint the UI widget fetches

mod config;
mod metrics;
mod pages;
mod routes;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hubspot_auth::{OAuthApp, build_authorization_url};
use hubspot_crm::CrmClient;
use tenant_store::{MongoTokenStore, TokenService};

use crate::config::Config;
use crate::routes::{AppState, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("starting hubspot-install-app");

    // Install Prometheus metrics recorder before any metrics are emitted
    let prometheus = metrics::install_recorder();

    let config = Config::from_env().context("failed to load configuration from environment")?;
    info!(
        port = config.port,
        db_name = %config.db_name,
        scope = %config.scope,
        redirect_uri = %config.redirect_uri,
        "configuration loaded"
    );

    let store = MongoTokenStore::connect(config.mongo_uri.expose(), &config.db_name)
        .await
        .context("failed to connect to MongoDB")?;

    let http = reqwest::Client::new();
    let oauth = OAuthApp::new(
        config.client_id.clone(),
        config.client_secret.clone(),
        config.redirect_uri.clone(),
    );
    let authorize_url =
        build_authorization_url(&config.client_id, &config.scope, &config.redirect_uri);

    let state = AppState {
        tokens: Arc::new(TokenService::new(Arc::new(store), oauth, http.clone())),
        crm: CrmClient::new(http),
        authorize_url,
        started_at: Instant::now(),
        prometheus,
    };
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!(%addr, "accepting requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
