//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::share::ShareStatus;

/// A folder in an owner's hierarchy.
///
/// `s3_key` is fixed at creation: the parent's key plus `folder_name/`,
/// or `folder_name/` for a root. Folders are never moved or renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Name, unique among siblings.
    pub folder_name: String,
    /// Human label for a root folder, derived from the owner's profile.
    pub display_name: Option<String>,
    /// Parent folder ID (null for root folders).
    pub parent_folder_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Object-store key prefix; the placeholder object lives at this key.
    pub s3_key: String,
    /// Whether this is the owner's root folder.
    pub is_root: bool,
    /// Whether a share token has been issued.
    pub shared: bool,
    /// Public share token, unique across folders.
    pub share_token: Option<String>,
    /// When the share link stops granting access. Null means never shared.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Label for breadcrumbs: the display name for roots, the folder name otherwise.
    pub fn label(&self) -> &str {
        match (&self.display_name, self.is_root) {
            (Some(display), true) if !display.trim().is_empty() => display,
            _ => &self.folder_name,
        }
    }

    /// Share state of this folder at `now`.
    pub fn share_status(&self, now: DateTime<Utc>) -> ShareStatus {
        ShareStatus::evaluate(self.shared, self.expires_at, now)
    }

    /// Object key for a file named `file_name` directly inside this folder.
    pub fn child_file_key(&self, file_name: &str) -> String {
        format!("{}{}", self.s3_key, file_name)
    }

    /// Object key for a subfolder named `folder_name` directly inside this folder.
    pub fn child_folder_key(&self, folder_name: &str) -> String {
        format!("{}{}/", self.s3_key, folder_name)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub folder_name: String,
    /// Display label (roots only).
    pub display_name: Option<String>,
    /// Parent folder (None for root).
    pub parent_folder_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Object-store key prefix.
    pub s3_key: String,
    /// Whether this is a root folder.
    pub is_root: bool,
}
