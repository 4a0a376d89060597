//! Storage construction from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use driveshare_core::config::StorageConfig;
use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_core::traits::StorageProvider;

use crate::providers::MemoryStorageProvider;
use crate::timeout::TimeoutStorage;

/// Build the configured provider, wrapped in [`TimeoutStorage`].
pub async fn build_storage(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
        "memory" => Arc::new(MemoryStorageProvider::new(config.s3.bucket.clone())),
        #[cfg(feature = "s3")]
        "s3" => Arc::new(crate::providers::S3StorageProvider::new(&config.s3).await?),
        other => {
            return Err(AppError::configuration(format!(
                "Unsupported storage provider '{other}'"
            )));
        }
    };

    info!(
        provider = provider.provider_type(),
        operation_timeout_seconds = config.operation_timeout_seconds,
        "Storage provider ready"
    );

    Ok(Arc::new(TimeoutStorage::new(
        provider,
        Duration::from_secs(config.operation_timeout_seconds),
    )))
}
