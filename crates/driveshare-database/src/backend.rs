//! Backend selection from configuration.

use std::sync::Arc;

use tracing::info;

use driveshare_core::config::DatabaseConfig;
use driveshare_core::result::AppResult;
use driveshare_core::traits::IdentityProvider;

use crate::connection::DatabasePool;
use crate::index::{FileIndex, FolderIndex};
use crate::memory::{MemoryIdentityProvider, MemoryTreeIndex};
use crate::migration::run_migrations;
use crate::repositories::{FileRepository, FolderRepository, IdentityRepository};

/// The Tree Index and identity adapter the services run against.
#[derive(Debug, Clone)]
pub struct IndexBackend {
    /// Folder rows.
    pub folders: Arc<dyn FolderIndex>,
    /// File rows.
    pub files: Arc<dyn FileIndex>,
    /// User profiles and attributes.
    pub identity: Arc<dyn IdentityProvider>,
    /// The Postgres pool, absent for the in-memory backend.
    pub pool: Option<DatabasePool>,
}

impl IndexBackend {
    /// Connect the backend named by `config.url`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if config.is_memory() {
            info!("Using in-memory tree index and identity backend");
            return Ok(Self::memory(MemoryTreeIndex::new(), MemoryIdentityProvider::new()));
        }

        let pool = DatabasePool::connect(config).await?;
        if config.run_migrations {
            run_migrations(pool.pool()).await?;
        }

        let pg = pool.pool().clone();
        Ok(Self {
            folders: Arc::new(FolderRepository::new(pg.clone())),
            files: Arc::new(FileRepository::new(pg.clone())),
            identity: Arc::new(IdentityRepository::new(pg)),
            pool: Some(pool),
        })
    }

    /// Build a backend over existing in-memory stores.
    pub fn memory(index: MemoryTreeIndex, identity: MemoryIdentityProvider) -> Self {
        Self {
            folders: Arc::new(index.clone()),
            files: Arc::new(index),
            identity: Arc::new(identity),
            pool: None,
        }
    }

    /// Report whether the index is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driveshare_core::config::database::MEMORY_DATABASE_URL;

    #[tokio::test]
    async fn test_memory_url_selects_memory_backend() {
        let config = DatabaseConfig {
            url: MEMORY_DATABASE_URL.to_string(),
            ..DatabaseConfig::default()
        };
        let backend = IndexBackend::connect(&config).await.unwrap();
        assert!(backend.pool.is_none());
        assert!(backend.health_check().await.unwrap());
    }
}
