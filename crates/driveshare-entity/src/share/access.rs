//! Outcome of resolving a file through a shared folder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A presigned URL granted through a folder share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFileUrl {
    /// Presigned retrieval URL.
    pub url: String,
    /// The file's name, for download prompts.
    pub file_name: String,
    /// When the presigned URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Result of checking whether a file may be served under a folder share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SharedFileAccess {
    /// The file lies in the shared subtree and the share is live.
    Granted(SharedFileUrl),
    /// The file lies in the shared subtree but the share has lapsed.
    Expired,
    /// The file is not inside the shared subtree.
    NotAccessible,
}

impl SharedFileAccess {
    /// The granted URL, if any.
    pub fn granted(&self) -> Option<&SharedFileUrl> {
        match self {
            Self::Granted(url) => Some(url),
            _ => None,
        }
    }
}
