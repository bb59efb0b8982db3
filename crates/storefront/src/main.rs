//! Nursery Storefront - catalog REST API server.
//!
//! Serves the product catalog and admin product management on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` for products, admin users and sessions
//! - Cart and checkout live entirely on the client
//!
//! Migrations are not applied on startup; run `nursery migrate` first.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use nursery_storefront::config::StorefrontConfig;
use nursery_storefront::state::AppState;
use nursery_storefront::{app, db, middleware, routes, seed, telemetry};

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = telemetry::init(&config);

    if let Err(e) = serve(config).await {
        tracing::error!(error = %e, "storefront stopped");
        std::process::exit(1);
    }
}

async fn serve(config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    let state = AppState::postgres(config.clone(), &pool);

    if config.seed_catalog
        && let Err(e) = seed::seed_if_empty(state.products()).await
    {
        tracing::error!(error = %e, "Failed to seed sample catalog");
    }

    let sessions = middleware::create_session_layer(
        middleware::postgres_session_store(&pool),
        state.config(),
    );

    // Sentry layers go outermost so they see the whole request.
    let app = app::router(routes::rate_limited_routes(), state, sessions)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("storefront listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    let _ = tokio::signal::ctrl_c().await;

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
