//! Tree Index contracts.
//!
//! The hierarchy and sharing engines talk to persistence only through
//! these two traits. Every implementation must enforce the same uniqueness
//! rules the PostgreSQL schema declares:
//!
//! - sibling folder names are unique under a parent ([`ErrorKind::DuplicateName`])
//! - folder `s3_key` values are globally unique ([`ErrorKind::DuplicateName`])
//! - an owner has at most one root folder ([`ErrorKind::Conflict`])
//! - share tokens are unique across folders ([`ErrorKind::Conflict`])
//! - file names are unique within a folder ([`ErrorKind::DuplicateName`])
//! - a folder with children or files cannot be deleted ([`ErrorKind::Conflict`])
//!
//! [`ErrorKind::DuplicateName`]: driveshare_core::ErrorKind::DuplicateName
//! [`ErrorKind::Conflict`]: driveshare_core::ErrorKind::Conflict

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use driveshare_core::result::AppResult;
use driveshare_entity::file::{CreateFile, File};
use driveshare_entity::folder::{CreateFolder, Folder};

/// Folder rows of the Tree Index.
#[async_trait]
pub trait FolderIndex: Send + Sync + std::fmt::Debug + 'static {
    /// Point lookup by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// Point lookup by share token. Expired tokens are still returned.
    async fn find_by_share_token(&self, token: &str) -> AppResult<Option<Folder>>;

    /// The owner's root folder, if one exists.
    async fn find_root_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Folder>>;

    /// Lookup by object-store key prefix.
    async fn find_by_s3_key(&self, s3_key: &str) -> AppResult<Option<Folder>>;

    /// Direct child folders, ordered by name.
    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>>;

    /// A direct child folder with the given name.
    async fn find_child_by_name(&self, parent_id: Uuid, name: &str) -> AppResult<Option<Folder>>;

    /// Insert a folder row.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Issue `token` on the folder and move `expires_at` to
    /// `max(expires_at, candidate)` in a single atomic step.
    ///
    /// Returns `None` when the folder does not exist.
    async fn extend_share(
        &self,
        id: Uuid,
        token: &str,
        candidate: DateTime<Utc>,
    ) -> AppResult<Option<Folder>>;

    /// Delete a folder row. Returns `false` when it was already gone.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// File rows of the Tree Index.
#[async_trait]
pub trait FileIndex: Send + Sync + std::fmt::Debug + 'static {
    /// Point lookup by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>>;

    /// Files directly inside a folder, ordered by name.
    async fn find_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<File>>;

    /// A file with the given name directly inside a folder.
    async fn find_by_folder_and_name(&self, folder_id: Uuid, name: &str) -> AppResult<Option<File>>;

    /// Insert a file row.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Mark the file shared and move `expires_at` to `max(expires_at, candidate)`.
    ///
    /// Returns `None` when the file does not exist.
    async fn extend_share(&self, id: Uuid, candidate: DateTime<Utc>) -> AppResult<Option<File>>;

    /// Delete a file row. Returns `false` when it was already gone.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
