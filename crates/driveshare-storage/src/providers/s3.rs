//! S3-compatible object storage provider.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Builder, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info, warn};

use driveshare_core::config::storage::S3StorageConfig;
use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_core::traits::StorageProvider;
use driveshare_core::types::PresignedUrl;

/// S3-compatible storage provider.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
}

impl S3StorageProvider {
    /// Create a new S3 storage provider.
    ///
    /// Static credentials are used when `access_key` is set; otherwise the
    /// default AWS credential chain is consulted.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 storage provider"
        );

        let mut builder = if config.access_key.is_empty() {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .load()
                .await;
            Builder::from(&shared)
        } else {
            Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .credentials_provider(Credentials::new(
                    config.access_key.clone(),
                    config.secret_key.clone(),
                    None,
                    None,
                    "driveshare",
                ))
        };

        builder = builder.force_path_style(config.force_path_style);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(config.endpoint.clone());
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(bucket = %self.bucket, error = %DisplayErrorContext(&e), "S3 health check failed");
                Ok(false)
            }
        }
    }

    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                AppError::storage_unavailable(format!(
                    "Failed to put object '{key}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, size, "Put S3 object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::storage_unavailable(format!(
                    "Failed to delete object '{key}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, "Deleted S3 object");
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<PresignedUrl> {
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::validation(format!("Invalid presign lifetime {ttl:?}: {e}"))
        })?;
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .ok_or_else(|| AppError::validation(format!("Presign lifetime {ttl:?} out of range")))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::storage_unavailable(format!(
                    "Failed to presign object '{key}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(PresignedUrl {
            url: request.uri().to_string(),
            expires_at,
        })
    }
}
