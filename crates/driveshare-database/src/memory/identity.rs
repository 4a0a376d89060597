//! In-memory identity profiles and attributes.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use driveshare_core::result::AppResult;
use driveshare_core::traits::IdentityProvider;
use driveshare_core::types::UserProfile;

/// Identity provider holding profiles and attributes in concurrent maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityProvider {
    profiles: Arc<DashMap<Uuid, UserProfile>>,
    attributes: Arc<DashMap<(Uuid, String), String>>,
}

impl MemoryIdentityProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a user's profile.
    pub fn insert_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.user_id, profile);
    }

    /// Remove an attribute, as if it had never been written.
    pub fn clear_attribute(&self, user_id: Uuid, key: &str) {
        self.attributes.remove(&(user_id, key.to_string()));
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn get_attribute(&self, user_id: Uuid, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .attributes
            .get(&(user_id, key.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn set_attribute(&self, user_id: Uuid, key: &str, value: &str) -> AppResult<()> {
        self.attributes
            .insert((user_id, key.to_string()), value.to_string());
        Ok(())
    }
}
