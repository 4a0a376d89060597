//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use driveshare_core::config::AppConfig;
use driveshare_core::traits::StorageProvider;
use driveshare_database::IndexBackend;
use driveshare_service::{FileService, FolderService, ShareService};

use crate::auth::JwtDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Tree index and identity adapter
    pub backend: IndexBackend,
    /// Object store
    pub storage: Arc<dyn StorageProvider>,
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Hierarchy engine
    pub folder_service: Arc<FolderService>,
    /// Sharing engine
    pub share_service: Arc<ShareService>,
    /// File transfer operations
    pub file_service: Arc<FileService>,
}

impl AppState {
    /// Wires the services over a backend and object store.
    pub fn new(config: AppConfig, backend: IndexBackend, storage: Arc<dyn StorageProvider>) -> Self {
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&backend.folders),
            Arc::clone(&backend.files),
            Arc::clone(&storage),
            Arc::clone(&backend.identity),
            &config.hierarchy,
        ));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&folder_service),
            Arc::clone(&backend.folders),
            Arc::clone(&backend.files),
            Arc::clone(&storage),
            &config.share,
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&folder_service),
            Arc::clone(&backend.files),
            Arc::clone(&storage),
            &config.storage,
            &config.share,
        ));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            backend,
            storage,
            jwt_decoder,
            folder_service,
            share_service,
            file_service,
        }
    }
}
