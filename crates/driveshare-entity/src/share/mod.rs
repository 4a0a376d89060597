//! Share domain entities.

pub mod access;
pub mod link;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use access::{SharedFileAccess, SharedFileUrl};
pub use link::ShareLink;

/// State of a folder or file share at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareStatus {
    /// No token has ever been issued.
    NeverShared,
    /// The link still grants access.
    Active,
    /// The link exists but `expires_at` has passed.
    Expired,
}

impl ShareStatus {
    /// Classify a share from its stored fields.
    ///
    /// A share expires strictly after `expires_at`; the instant itself is
    /// still active. A null `expires_at` always means never shared.
    pub fn evaluate(shared: bool, expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match expires_at {
            None => Self::NeverShared,
            Some(at) if at < now => Self::Expired,
            Some(_) if shared => Self::Active,
            Some(_) => Self::Expired,
        }
    }

    /// Whether the share currently grants access.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
