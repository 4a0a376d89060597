//! Application builder: wires router, middleware, and state into an Axum app.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use driveshare_core::config::AppConfig;
use driveshare_core::error::{AppError, ErrorKind};
use driveshare_database::IndexBackend;
use driveshare_storage::build_storage;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();
    let body_limit = usize::try_from(config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    build_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(build_cors_layer(&config.server.cors))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Connects the configured backends and serves until a shutdown signal.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let index = if config.database.is_memory() { "memory" } else { "postgres" };
    info!(
        index,
        storage = %config.storage.provider,
        "Starting DriveShare server"
    );

    let backend = IndexBackend::connect(&config.database).await?;
    let storage = build_storage(&config.storage).await?;
    if !storage.health_check().await.unwrap_or(false) {
        warn!(provider = %config.storage.provider, "Object store is not reachable yet");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, backend.clone(), storage);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;

    info!(%addr, "DriveShare server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    if let Some(pool) = backend.pool {
        pool.close().await;
    }
    info!("DriveShare server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
