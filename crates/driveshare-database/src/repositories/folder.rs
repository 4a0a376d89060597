//! Folder repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use driveshare_core::error::{AppError, ErrorKind};
use driveshare_core::result::AppResult;
use driveshare_entity::folder::{CreateFolder, Folder};

use crate::index::FolderIndex;

/// Postgres-backed folder rows.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderIndex for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_share_token(&self, token: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE share_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find folder by token", e)
            })
    }

    async fn find_root_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE owner_id = $1 AND is_root = TRUE")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root folder", e))
    }

    async fn find_by_s3_key(&self, s3_key: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE s3_key = $1")
            .bind(s3_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find folder by key", e)
            })
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_folder_id = $1 ORDER BY folder_name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_child_by_name(&self, parent_id: Uuid, name: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_folder_id = $1 AND folder_name = $2",
        )
        .bind(parent_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find child folder", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (folder_name, display_name, parent_folder_id, owner_id, s3_key, is_root) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.folder_name)
        .bind(&data.display_name)
        .bind(data.parent_folder_id)
        .bind(data.owner_id)
        .bind(&data.s3_key)
        .bind(data.is_root)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) => match db_err.constraint() {
                Some("folders_parent_name_key") => AppError::duplicate_name(format!(
                    "A folder named '{}' already exists here",
                    data.folder_name
                )),
                Some("folders_s3_key_key") => AppError::duplicate_name(format!(
                    "Folder key '{}' already exists",
                    data.s3_key
                )),
                Some("folders_owner_root_key") => {
                    AppError::conflict(format!("Owner {} already has a root folder", data.owner_id))
                }
                Some("folders_parent_folder_id_fkey") => AppError::not_found(format!(
                    "Parent folder {:?} not found",
                    data.parent_folder_id
                )),
                _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
            },
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    async fn extend_share(
        &self,
        id: Uuid,
        token: &str,
        candidate: DateTime<Utc>,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET share_token = $2, shared = TRUE, \
             expires_at = GREATEST(COALESCE(expires_at, $3), $3), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(token)
        .bind(candidate)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_share_token_key") =>
            {
                AppError::conflict("Share token already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to share folder", e),
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::conflict(format!("Folder {id} still has children"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete folder", e),
            })?;
        Ok(result.rows_affected() > 0)
    }
}
