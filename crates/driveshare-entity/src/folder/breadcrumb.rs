//! Breadcrumb trail entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One step of the path from an owner's root down to a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The folder this step points at.
    pub folder_id: Uuid,
    /// Human-readable label.
    pub label: String,
}

impl Breadcrumb {
    /// Create a breadcrumb.
    pub fn new(folder_id: Uuid, label: impl Into<String>) -> Self {
        Self {
            folder_id,
            label: label.into(),
        }
    }
}
