//! Folder hierarchy handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use driveshare_core::error::AppError;
use driveshare_entity::folder::{Breadcrumb, Folder, FolderTree};
use driveshare_service::DeletionReport;

use crate::dto::ApiResponse;
use crate::dto::request::{BreadcrumbQuery, CreateFolderRequest, validated};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders/root
pub async fn create_root_folder(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Folder>>, AppError> {
    let root = state.folder_service.create_root_folder(&auth).await?;
    Ok(Json(ApiResponse::ok(root)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), AppError> {
    let req = validated(req)?;
    let folder = state
        .folder_service
        .create_subfolder(&auth, req.parent_id, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Folder>>, AppError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /api/folders/{id}/tree
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FolderTree>>, AppError> {
    let subtree = state.folder_service.get_folder_recursively(&auth, id).await?;
    Ok(Json(ApiResponse::ok(subtree.into_tree())))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletionReport>>, AppError> {
    let report = state
        .folder_service
        .delete_folder_recursively(&auth, id)
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/breadcrumbs?folder_id=...
pub async fn breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BreadcrumbQuery>,
) -> Result<Json<ApiResponse<Vec<Breadcrumb>>>, AppError> {
    let trail = state
        .folder_service
        .get_ancestors(&auth, query.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(trail)))
}
