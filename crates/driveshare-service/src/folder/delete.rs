//! Recursive deletion outcome.

use serde::{Deserialize, Serialize};

/// What a recursive delete removed, and which objects it had to leave behind.
///
/// Index rows are always removed; object deletions are best-effort, so any
/// key whose delete failed or timed out is listed in `storage_leaks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
    /// Folder rows removed, including the folder the delete started from.
    pub folders_removed: usize,
    /// File rows removed.
    pub files_removed: usize,
    /// Object keys that could not be deleted from the store.
    pub storage_leaks: Vec<String>,
}

impl DeletionReport {
    /// Whether every object was removed from the store.
    pub fn is_clean(&self) -> bool {
        self.storage_leaks.is_empty()
    }
}
