//! File upload, retrieval URLs, and deletion.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use driveshare_core::config::{ShareConfig, StorageConfig};
use driveshare_core::error::{AppError, ErrorKind};
use driveshare_core::result::AppResult;
use driveshare_core::traits::StorageProvider;
use driveshare_core::types::PresignedUrl;
use driveshare_database::index::FileIndex;
use driveshare_entity::file::{CreateFile, File};

use crate::context::RequestContext;
use crate::folder::FolderService;
use crate::naming::validate_name;

/// Content type recorded when the uploader supplies none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded file's metadata and bytes.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name, used as the last object-key segment.
    pub file_name: String,
    /// MIME type.
    pub file_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

/// Handles file transfers for the caller's folders.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Hierarchy engine, for folder ownership checks.
    folder_service: Arc<FolderService>,
    /// File rows.
    files: Arc<dyn FileIndex>,
    /// Object store.
    storage: Arc<dyn StorageProvider>,
    /// Lifetime of URLs from [`FileService::get_file_url`].
    url_ttl: Duration,
    /// Largest accepted upload.
    max_upload_size: u64,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        folder_service: Arc<FolderService>,
        files: Arc<dyn FileIndex>,
        storage: Arc<dyn StorageProvider>,
        storage_config: &StorageConfig,
        share_config: &ShareConfig,
    ) -> Self {
        Self {
            folder_service,
            files,
            storage,
            url_ttl: Duration::from_secs(share_config.file_url_ttl_seconds),
            max_upload_size: storage_config.max_upload_size_bytes,
        }
    }

    /// Uploads a file into one of the caller's folders.
    ///
    /// The object is written first. If the row insert then fails the object
    /// is left orphaned and the call fails with `Upload`.
    pub async fn upload_file_to_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        upload: UploadFile,
    ) -> AppResult<File> {
        let size = upload.data.len() as u64;
        if size > self.max_upload_size {
            return Err(AppError::validation(format!(
                "File is {size} bytes; the limit is {} bytes",
                self.max_upload_size
            )));
        }
        let file_name = validate_name("File", &upload.file_name)?;
        let folder = self.folder_service.get_folder(ctx, folder_id).await?;

        if self
            .files
            .find_by_folder_and_name(folder.id, &file_name)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate_name(format!(
                "A file named '{file_name}' already exists in this folder"
            )));
        }

        let file_type = upload
            .file_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let s3_key = folder.child_file_key(&file_name);

        self.storage
            .put(&s3_key, upload.data, Some(&file_type))
            .await?;

        let data = CreateFile {
            file_name,
            size: size as i64,
            file_type,
            parent_folder_id: folder.id,
            owner_id: folder.owner_id,
            s3_key,
        };
        let file = match self.files.create(&data).await {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    folder_id = %folder.id,
                    s3_key = %data.s3_key,
                    error = %e,
                    "File insert failed; uploaded object left in storage"
                );
                return Err(AppError::with_source(
                    ErrorKind::Upload,
                    format!("Stored '{}' but could not record it", data.file_name),
                    e,
                ));
            }
        };

        info!(
            file_id = %file.id,
            folder_id = %folder.id,
            size = file.size,
            s3_key = %file.s3_key,
            "File uploaded"
        );
        Ok(file)
    }

    /// A presigned retrieval URL for one of the caller's files.
    pub async fn get_file_url(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<PresignedUrl> {
        let file = self.owned_file(ctx, file_id).await?;
        self.storage.presign_get(&file.s3_key, self.url_ttl).await
    }

    /// Deletes a file's object, then its row.
    ///
    /// A missing object counts as deleted; any other storage failure aborts
    /// before the row is touched.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self.owned_file(ctx, file_id).await?;

        match self.storage.delete(&file.s3_key).await {
            Ok(()) => {}
            Err(e) if e.is(ErrorKind::NotFound) => {}
            Err(e) => return Err(e),
        }

        if !self.files.delete(file.id).await? {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }

        info!(file_id = %file.id, s3_key = %file.s3_key, "File deleted");
        Ok(())
    }

    async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        if file.owner_id != ctx.user_id {
            return Err(AppError::unauthorized(format!(
                "File {file_id} belongs to another user"
            )));
        }
        Ok(file)
    }
}
