//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::share::ShareStatus;

/// A file stored under a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file name (including extension).
    pub file_name: String,
    /// File size in bytes.
    pub size: i64,
    /// MIME type of the file.
    #[serde(rename = "type")]
    pub file_type: String,
    /// The folder containing this file.
    pub parent_folder_id: Uuid,
    /// The file owner, copied from the folder at upload time.
    pub owner_id: Uuid,
    /// Object key: the parent folder's `s3_key` plus `file_name`.
    pub s3_key: String,
    /// Whether a share link has been issued for this file.
    pub shared: bool,
    /// When the file share stops granting access. Null means never shared.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Share state of this file at `now`.
    pub fn share_status(&self, now: DateTime<Utc>) -> ShareStatus {
        ShareStatus::evaluate(self.shared, self.expires_at, now)
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub file_name: String,
    /// File size in bytes.
    pub size: i64,
    /// MIME type.
    pub file_type: String,
    /// The folder to place the file in.
    pub parent_folder_id: Uuid,
    /// The file owner.
    pub owner_id: Uuid,
    /// Object key.
    pub s3_key: String,
}
