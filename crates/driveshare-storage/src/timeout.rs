//! Deadline decorator for storage providers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_core::traits::StorageProvider;
use driveshare_core::types::PresignedUrl;

/// Wraps a provider so every call is bounded by a deadline.
///
/// An elapsed deadline surfaces as `StorageUnavailable`, the same kind a
/// failed call produces, so callers handle both paths identically.
#[derive(Debug, Clone)]
pub struct TimeoutStorage {
    inner: Arc<dyn StorageProvider>,
    limit: Duration,
}

impl TimeoutStorage {
    /// Wrap `inner` with a per-call deadline.
    pub fn new(inner: Arc<dyn StorageProvider>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T>(
        &self,
        op: &str,
        key: &str,
        fut: impl Future<Output = AppResult<T>> + Send,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.limit, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, key, limit_ms = self.limit.as_millis() as u64, "Storage call timed out");
                Err(AppError::storage_unavailable(format!(
                    "Storage {op} on '{key}' timed out after {:?}",
                    self.limit
                )))
            }
        }
    }
}

#[async_trait]
impl StorageProvider for TimeoutStorage {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.bounded("health_check", "", self.inner.health_check())
            .await
    }

    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        self.bounded("put", key, self.inner.put(key, data, content_type))
            .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.bounded("delete", key, self.inner.delete(key)).await
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<PresignedUrl> {
        self.bounded("presign", key, self.inner.presign_get(key, ttl))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MemoryStorageProvider;
    use driveshare_core::error::ErrorKind;

    #[derive(Debug)]
    struct StalledStorage;

    #[async_trait]
    impl StorageProvider for StalledStorage {
        fn provider_type(&self) -> &str {
            "stalled"
        }

        async fn health_check(&self) -> AppResult<bool> {
            std::future::pending().await
        }

        async fn put(&self, _key: &str, _data: Bytes, _ct: Option<&str>) -> AppResult<()> {
            std::future::pending().await
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            std::future::pending().await
        }

        async fn presign_get(&self, _key: &str, _ttl: Duration) -> AppResult<PresignedUrl> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_call_becomes_storage_unavailable() {
        let storage = TimeoutStorage::new(Arc::new(StalledStorage), Duration::from_secs(5));

        let err = storage
            .put("k", Bytes::new(), None)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::StorageUnavailable));

        let err = storage.delete("k").await.unwrap_err();
        assert!(err.is(ErrorKind::StorageUnavailable));
    }

    #[tokio::test]
    async fn test_fast_calls_pass_through() {
        let inner = MemoryStorageProvider::new("b");
        let storage = TimeoutStorage::new(Arc::new(inner.clone()), Duration::from_secs(5));

        storage.put("k", Bytes::from_static(b"x"), None).await.unwrap();
        assert!(inner.contains("k"));
        assert_eq!(storage.provider_type(), "memory");
    }
}
