//! Share link handlers, owner-side and public.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use driveshare_core::error::AppError;
use driveshare_entity::folder::FolderTree;
use driveshare_entity::share::{ShareLink, SharedFileAccess, SharedFileUrl};

use crate::dto::ApiResponse;
use crate::dto::request::ShareRequest;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders/{id}/share
pub async fn share_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ShareRequest>,
) -> Result<Json<ApiResponse<ShareLink>>, AppError> {
    let link = state
        .share_service
        .share_folder(&auth, id, req.hours, &state.config.share.public_base_url)
        .await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// POST /api/files/{id}/share
pub async fn share_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ShareRequest>,
) -> Result<Json<ApiResponse<ShareLink>>, AppError> {
    let link = state.share_service.share_file(&auth, id, req.hours).await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// GET /api/shared/folder/{token}
pub async fn open_shared_folder(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<FolderTree>>, AppError> {
    let tree = state.share_service.open_shared_folder(&token).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/shared/folder/{token}/files/{file_id}
pub async fn shared_file(
    State(state): State<AppState>,
    Path((token, file_id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<SharedFileUrl>>, AppError> {
    match state
        .share_service
        .access_shared_file(&token, file_id)
        .await?
    {
        SharedFileAccess::Granted(url) => Ok(Json(ApiResponse::ok(url))),
        SharedFileAccess::Expired => Err(AppError::forbidden("Share link has expired")),
        SharedFileAccess::NotAccessible => Err(AppError::not_found(format!(
            "File {file_id} is not part of this share"
        ))),
    }
}
