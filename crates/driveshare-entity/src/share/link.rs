//! Share link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link handed back after sharing a folder or file.
///
/// For folders `url` is the public share page; for files it is a presigned
/// object URL. `expires_at` is always the logical share lifetime recorded
/// in the index, never the presign TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// The full URL for accessing the share.
    pub url: String,
    /// When the share stops granting access.
    pub expires_at: DateTime<Utc>,
}
