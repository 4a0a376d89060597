//! Object store contract.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::presigned::PresignedUrl;

/// Trait for object storage backends.
///
/// Keys are flat strings; folders are represented by zero-byte placeholder
/// objects whose key ends with `/`. Implementations exist for S3-compatible
/// stores and for an in-process map. The [`StorageProvider`] trait is
/// defined here in `driveshare-core` and implemented in `driveshare-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write an object, replacing any existing object at `key`.
    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()>;

    /// Delete an object. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Issue a credential-free, time-bounded retrieval URL for `key`.
    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<PresignedUrl>;
}
