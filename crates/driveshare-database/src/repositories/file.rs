//! File repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use driveshare_core::error::{AppError, ErrorKind};
use driveshare_core::result::AppResult;
use driveshare_entity::file::{CreateFile, File};

use crate::index::FileIndex;

/// Postgres-backed file rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileIndex for FileRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE parent_folder_id = $1 ORDER BY file_name ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn find_by_folder_and_name(&self, folder_id: Uuid, name: &str) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE parent_folder_id = $1 AND file_name = $2")
            .bind(folder_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find file by name", e)
            })
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (file_name, size, file_type, parent_folder_id, owner_id, s3_key) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.file_name)
        .bind(data.size)
        .bind(&data.file_type)
        .bind(data.parent_folder_id)
        .bind(data.owner_id)
        .bind(&data.s3_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) => match db_err.constraint() {
                Some("files_parent_name_key") => AppError::duplicate_name(format!(
                    "A file named '{}' already exists in this folder",
                    data.file_name
                )),
                Some("files_parent_folder_id_fkey") => AppError::not_found(format!(
                    "Folder {} not found",
                    data.parent_folder_id
                )),
                _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
            },
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })
    }

    async fn extend_share(&self, id: Uuid, candidate: DateTime<Utc>) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET shared = TRUE, \
             expires_at = GREATEST(COALESCE(expires_at, $2), $2) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(candidate)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to share file", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}
