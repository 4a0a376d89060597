//! Identity provider contract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::profile::UserProfile;

/// Attribute under which a user's root folder id is remembered.
pub const ROOT_FOLDER_ATTRIBUTE: &str = "root_folder_id";

/// Per-user profile and key/value metadata supplied by the identity system.
///
/// Read-after-write consistency is assumed but not guaranteed, so callers
/// re-resolve any id read from here against the tree index.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the profile of a user, if the identity system knows one.
    async fn profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Read a metadata attribute.
    async fn get_attribute(&self, user_id: Uuid, key: &str) -> AppResult<Option<String>>;

    /// Write a metadata attribute, replacing any previous value.
    async fn set_attribute(&self, user_id: Uuid, key: &str, value: &str) -> AppResult<()>;
}
