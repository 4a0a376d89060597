//! Route definitions for the DriveShare HTTP API.
//!
//! All routes are mounted under `/api`. Owner routes authenticate through
//! the [`AuthUser`](crate::extractors::AuthUser) extractor; shared-link
//! routes are public.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router without outer layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(shared_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Hierarchy endpoints
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders/root", post(handlers::folder::create_root_folder))
        .route("/folders", post(handlers::folder::create_folder))
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder).delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/tree", get(handlers::folder::get_tree))
        .route("/folders/{id}/share", post(handlers::share::share_folder))
        .route("/folders/{id}/files", post(handlers::file::upload_file))
        .route("/breadcrumbs", get(handlers::folder::breadcrumbs))
}

/// File endpoints
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/url", get(handlers::file::get_file_url))
        .route("/files/{id}/share", post(handlers::share::share_file))
}

/// Public share-link endpoints
fn shared_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shared/folder/{token}",
            get(handlers::share::open_shared_folder),
        )
        .route(
            "/shared/folder/{token}/files/{file_id}",
            get(handlers::share::shared_file),
        )
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
