//! Presigned retrieval URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A credential-free URL for direct object retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    /// The URL.
    pub url: String,
    /// When the signature stops being accepted.
    pub expires_at: DateTime<Utc>,
}
