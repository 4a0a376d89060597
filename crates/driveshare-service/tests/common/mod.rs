//! Shared fixtures for the service integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use driveshare_core::config::{HierarchyConfig, ShareConfig, StorageConfig};
use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_core::traits::{IdentityProvider, StorageProvider};
use driveshare_core::types::{PresignedUrl, UserProfile};
use driveshare_database::index::{FileIndex, FolderIndex};
use driveshare_database::memory::{MemoryIdentityProvider, MemoryTreeIndex};
use driveshare_entity::file::{CreateFile, File};
use driveshare_service::{FileService, FolderService, RequestContext, ShareService, UploadFile};
use driveshare_storage::TimeoutStorage;
use driveshare_storage::providers::MemoryStorageProvider;

pub const ORIGIN: &str = "https://drive.example.com";

/// Services wired over in-memory backends, with handles on every store.
pub struct Harness {
    pub index: MemoryTreeIndex,
    pub storage: MemoryStorageProvider,
    pub flaky: FlakyStorage,
    pub identity: MemoryIdentityProvider,
    pub folders: Arc<FolderService>,
    pub shares: ShareService,
    pub files: FileService,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(None, false, &HierarchyConfig::default())
    }

    /// Harness whose storage calls are cut off after `limit`.
    pub fn with_storage_timeout(limit: Duration) -> Self {
        Self::build(Some(limit), false, &HierarchyConfig::default())
    }

    /// Harness whose file index rejects every insert.
    pub fn with_failing_file_inserts() -> Self {
        Self::build(None, true, &HierarchyConfig::default())
    }

    /// Harness that allows folders at most `max_depth` levels below a root.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::build(None, false, &HierarchyConfig { max_depth })
    }

    fn build(timeout: Option<Duration>, failing_files: bool, hierarchy: &HierarchyConfig) -> Self {
        let index = MemoryTreeIndex::new();
        let storage = MemoryStorageProvider::new("test-bucket");
        let flaky = FlakyStorage::new(storage.clone());
        let identity = MemoryIdentityProvider::new();

        let store: Arc<dyn StorageProvider> = match timeout {
            Some(limit) => Arc::new(TimeoutStorage::new(Arc::new(flaky.clone()), limit)),
            None => Arc::new(flaky.clone()),
        };
        let file_index: Arc<dyn FileIndex> = if failing_files {
            Arc::new(RejectingFileIndex(index.clone()))
        } else {
            Arc::new(index.clone())
        };

        let (folders, shares, files) = wire(
            Arc::new(index.clone()),
            file_index,
            store,
            Arc::new(identity.clone()),
            hierarchy,
        );

        Self {
            index,
            storage,
            flaky,
            identity,
            folders,
            shares,
            files,
        }
    }

    pub fn user(&self, first: &str, last: &str) -> RequestContext {
        let user_id = Uuid::new_v4();
        self.identity.insert_profile(UserProfile {
            user_id,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            full_name: None,
        });
        RequestContext::new(user_id)
    }

    pub async fn upload(&self, ctx: &RequestContext, folder_id: Uuid, name: &str, body: &[u8]) -> File {
        self.files
            .upload_file_to_folder(ctx, folder_id, text_file(name, body))
            .await
            .expect("upload should succeed")
    }
}

pub fn wire(
    folders: Arc<dyn FolderIndex>,
    files: Arc<dyn FileIndex>,
    storage: Arc<dyn StorageProvider>,
    identity: Arc<dyn IdentityProvider>,
    hierarchy: &HierarchyConfig,
) -> (Arc<FolderService>, ShareService, FileService) {
    let folder_service = Arc::new(FolderService::new(
        folders.clone(),
        files.clone(),
        storage.clone(),
        identity,
        hierarchy,
    ));
    let share_service = ShareService::new(
        folder_service.clone(),
        folders,
        files.clone(),
        storage.clone(),
        &ShareConfig::default(),
    );
    let file_service = FileService::new(
        folder_service.clone(),
        files,
        storage,
        &StorageConfig::default(),
        &ShareConfig::default(),
    );
    (folder_service, share_service, file_service)
}

pub fn text_file(name: &str, body: &[u8]) -> UploadFile {
    UploadFile {
        file_name: name.to_string(),
        file_type: Some("text/plain".to_string()),
        data: Bytes::copy_from_slice(body),
    }
}

pub fn later(hours: i64) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::hours(hours)
}

/// Storage that can be told to fail or stall selected operations.
#[derive(Debug, Clone)]
pub struct FlakyStorage {
    inner: MemoryStorageProvider,
    fail_puts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
    stall_puts: Arc<AtomicBool>,
    stall_deletes: Arc<AtomicBool>,
    missing_on_delete: Arc<AtomicBool>,
}

impl FlakyStorage {
    pub fn new(inner: MemoryStorageProvider) -> Self {
        Self {
            inner,
            fail_puts: Arc::default(),
            fail_deletes: Arc::default(),
            stall_puts: Arc::default(),
            stall_deletes: Arc::default(),
            missing_on_delete: Arc::default(),
        }
    }

    pub fn fail_puts(&self, on: bool) {
        self.fail_puts.store(on, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, on: bool) {
        self.fail_deletes.store(on, Ordering::SeqCst);
    }

    pub fn stall_puts(&self, on: bool) {
        self.stall_puts.store(on, Ordering::SeqCst);
    }

    pub fn stall_deletes(&self, on: bool) {
        self.stall_deletes.store(on, Ordering::SeqCst);
    }

    /// Make deletes report the object as already gone.
    pub fn report_missing_on_delete(&self, on: bool) {
        self.missing_on_delete.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageProvider for FlakyStorage {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        if self.stall_puts.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(AppError::storage_unavailable(format!("put '{key}' refused")));
        }
        self.inner.put(key, data, content_type).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if self.stall_deletes.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::storage_unavailable(format!("delete '{key}' refused")));
        }
        if self.missing_on_delete.load(Ordering::SeqCst) {
            self.inner.delete(key).await?;
            return Err(AppError::not_found(format!("No object at '{key}'")));
        }
        self.inner.delete(key).await
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<PresignedUrl> {
        self.inner.presign_get(key, ttl).await
    }
}

/// File index whose inserts always fail, as if the database went away.
#[derive(Debug, Clone)]
pub struct RejectingFileIndex(pub MemoryTreeIndex);

#[async_trait]
impl FileIndex for RejectingFileIndex {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        FileIndex::find_by_id(&self.0, id).await
    }

    async fn find_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<File>> {
        self.0.find_by_folder(folder_id).await
    }

    async fn find_by_folder_and_name(&self, folder_id: Uuid, name: &str) -> AppResult<Option<File>> {
        self.0.find_by_folder_and_name(folder_id, name).await
    }

    async fn create(&self, _data: &CreateFile) -> AppResult<File> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn extend_share(&self, id: Uuid, candidate: DateTime<Utc>) -> AppResult<Option<File>> {
        FileIndex::extend_share(&self.0, id, candidate).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        FileIndex::delete(&self.0, id).await
    }
}

/// Identity provider whose attribute writes always fail.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyIdentity(pub MemoryIdentityProvider);

#[async_trait]
impl IdentityProvider for ReadOnlyIdentity {
    async fn profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.0.profile(user_id).await
    }

    async fn get_attribute(&self, user_id: Uuid, key: &str) -> AppResult<Option<String>> {
        self.0.get_attribute(user_id, key).await
    }

    async fn set_attribute(&self, _user_id: Uuid, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::internal("identity service is read-only"))
    }
}
