//! File upload, URL, and delete handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use driveshare_core::error::AppError;
use driveshare_core::types::PresignedUrl;
use driveshare_entity::file::File;
use driveshare_service::UploadFile;

use crate::dto::ApiResponse;
use crate::dto::response::MessageResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders/{id}/files (multipart, field `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<File>>), AppError> {
    let mut upload: Option<UploadFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::validation("Upload is missing a file name"))?;
        let file_type = field.content_type().map(String::from);
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

        upload = Some(UploadFile {
            file_name,
            file_type,
            data,
        });
    }

    let upload = upload.ok_or_else(|| AppError::validation("Missing 'file' field"))?;
    let file = state
        .file_service
        .upload_file_to_folder(&auth, folder_id, upload)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// GET /api/files/{id}/url
pub async fn get_file_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PresignedUrl>>, AppError> {
    let url = state.file_service.get_file_url(&auth, id).await?;
    Ok(Json(ApiResponse::ok(url)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("File deleted"))))
}
