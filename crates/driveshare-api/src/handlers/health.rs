//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::ApiResponse;
use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = state.backend.health_check().await.unwrap_or(false);
    let storage = state.storage.health_check().await.unwrap_or(false);

    let label = |up: bool| (if up { "connected" } else { "unavailable" }).to_string();
    Json(ApiResponse::ok(HealthResponse {
        status: (if database && storage { "ok" } else { "degraded" }).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: label(database),
        storage: label(storage),
    }))
}
