//! In-process object storage provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_core::traits::StorageProvider;
use driveshare_core::types::PresignedUrl;

/// A stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object bytes.
    pub data: Bytes,
    /// Content type recorded at upload.
    pub content_type: Option<String>,
}

/// Object store held in a concurrent map.
///
/// Presigned URLs use the `memory://{bucket}/{key}` scheme and carry their
/// expiry as a query parameter; nothing serves them.
#[derive(Debug, Clone)]
pub struct MemoryStorageProvider {
    bucket: String,
    objects: Arc<DashMap<String, StoredObject>>,
}

impl MemoryStorageProvider {
    /// Create an empty store for `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(DashMap::new()),
        }
    }

    /// Fetch an object.
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.get(key).map(|entry| entry.value().clone())
    }

    /// Whether an object exists at `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        debug!(key, size = data.len(), "Put memory object");
        self.objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.remove(key);
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<PresignedUrl> {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .ok_or_else(|| AppError::validation(format!("Presign lifetime {ttl:?} out of range")))?;

        Ok(PresignedUrl {
            url: format!(
                "memory://{}/{}?expires={}",
                self.bucket,
                key,
                expires_at.timestamp()
            ),
            expires_at,
        })
    }
}
