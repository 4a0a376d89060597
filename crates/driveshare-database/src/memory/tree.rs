//! In-memory Tree Index.
//!
//! Folders and files share one state behind a single `RwLock` so that the
//! cross-table rules (a folder cannot be deleted while files reference it,
//! a file cannot be created under a missing folder) are checked and applied
//! in one critical section. The lock is never held across an await.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_entity::file::{CreateFile, File};
use driveshare_entity::folder::{CreateFolder, Folder};

use crate::index::{FileIndex, FolderIndex};

#[derive(Debug, Default)]
struct TreeState {
    folders: HashMap<Uuid, Folder>,
    files: HashMap<Uuid, File>,
}

impl TreeState {
    fn sorted_folders<'a>(iter: impl Iterator<Item = &'a Folder>) -> Vec<Folder> {
        let mut out: Vec<Folder> = iter.cloned().collect();
        out.sort_by(|a, b| a.folder_name.cmp(&b.folder_name));
        out
    }

    fn sorted_files<'a>(iter: impl Iterator<Item = &'a File>) -> Vec<File> {
        let mut out: Vec<File> = iter.cloned().collect();
        out.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        out
    }
}

/// Folder and file index held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTreeIndex {
    state: Arc<RwLock<TreeState>>,
}

impl MemoryTreeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of folder rows.
    pub async fn folder_count(&self) -> usize {
        self.state.read().await.folders.len()
    }

    /// Number of file rows.
    pub async fn file_count(&self) -> usize {
        self.state.read().await.files.len()
    }

    /// Overwrite a folder row as-is, bypassing every constraint.
    ///
    /// Only useful for simulating a corrupted index in tests.
    pub async fn force_put_folder(&self, folder: Folder) {
        self.state.write().await.folders.insert(folder.id, folder);
    }
}

#[async_trait]
impl FolderIndex for MemoryTreeIndex {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.state.read().await.folders.get(&id).cloned())
    }

    async fn find_by_share_token(&self, token: &str) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state
            .folders
            .values()
            .find(|f| f.share_token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_root_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state
            .folders
            .values()
            .find(|f| f.is_root && f.owner_id == owner_id)
            .cloned())
    }

    async fn find_by_s3_key(&self, s3_key: &str) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state.folders.values().find(|f| f.s3_key == s3_key).cloned())
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        Ok(TreeState::sorted_folders(
            state
                .folders
                .values()
                .filter(|f| f.parent_folder_id == Some(parent_id)),
        ))
    }

    async fn find_child_by_name(&self, parent_id: Uuid, name: &str) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state
            .folders
            .values()
            .find(|f| f.parent_folder_id == Some(parent_id) && f.folder_name == name)
            .cloned())
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut state = self.state.write().await;

        if let Some(parent_id) = data.parent_folder_id {
            if !state.folders.contains_key(&parent_id) {
                return Err(AppError::not_found(format!(
                    "Parent folder {parent_id} not found"
                )));
            }
            if state
                .folders
                .values()
                .any(|f| f.parent_folder_id == Some(parent_id) && f.folder_name == data.folder_name)
            {
                return Err(AppError::duplicate_name(format!(
                    "A folder named '{}' already exists here",
                    data.folder_name
                )));
            }
        }
        if state.folders.values().any(|f| f.s3_key == data.s3_key) {
            return Err(AppError::duplicate_name(format!(
                "Folder key '{}' already exists",
                data.s3_key
            )));
        }
        if data.is_root
            && state
                .folders
                .values()
                .any(|f| f.is_root && f.owner_id == data.owner_id)
        {
            return Err(AppError::conflict(format!(
                "Owner {} already has a root folder",
                data.owner_id
            )));
        }

        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            folder_name: data.folder_name.clone(),
            display_name: data.display_name.clone(),
            parent_folder_id: data.parent_folder_id,
            owner_id: data.owner_id,
            s3_key: data.s3_key.clone(),
            is_root: data.is_root,
            shared: false,
            share_token: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        };
        state.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn extend_share(
        &self,
        id: Uuid,
        token: &str,
        candidate: DateTime<Utc>,
    ) -> AppResult<Option<Folder>> {
        let mut state = self.state.write().await;

        if state
            .folders
            .values()
            .any(|f| f.id != id && f.share_token.as_deref() == Some(token))
        {
            return Err(AppError::conflict("Share token already in use"));
        }

        let Some(folder) = state.folders.get_mut(&id) else {
            return Ok(None);
        };
        folder.share_token = Some(token.to_string());
        folder.shared = true;
        folder.expires_at = Some(folder.expires_at.map_or(candidate, |at| at.max(candidate)));
        folder.updated_at = Utc::now();
        Ok(Some(folder.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;

        let has_children = state.folders.values().any(|f| f.parent_folder_id == Some(id))
            || state.files.values().any(|f| f.parent_folder_id == id);
        if has_children {
            return Err(AppError::conflict(format!("Folder {id} still has children")));
        }
        Ok(state.folders.remove(&id).is_some())
    }
}

#[async_trait]
impl FileIndex for MemoryTreeIndex {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.state.read().await.files.get(&id).cloned())
    }

    async fn find_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<File>> {
        let state = self.state.read().await;
        Ok(TreeState::sorted_files(
            state
                .files
                .values()
                .filter(|f| f.parent_folder_id == folder_id),
        ))
    }

    async fn find_by_folder_and_name(&self, folder_id: Uuid, name: &str) -> AppResult<Option<File>> {
        let state = self.state.read().await;
        Ok(state
            .files
            .values()
            .find(|f| f.parent_folder_id == folder_id && f.file_name == name)
            .cloned())
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut state = self.state.write().await;

        if !state.folders.contains_key(&data.parent_folder_id) {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                data.parent_folder_id
            )));
        }
        if state
            .files
            .values()
            .any(|f| f.parent_folder_id == data.parent_folder_id && f.file_name == data.file_name)
        {
            return Err(AppError::duplicate_name(format!(
                "A file named '{}' already exists in this folder",
                data.file_name
            )));
        }

        let file = File {
            id: Uuid::new_v4(),
            file_name: data.file_name.clone(),
            size: data.size,
            file_type: data.file_type.clone(),
            parent_folder_id: data.parent_folder_id,
            owner_id: data.owner_id,
            s3_key: data.s3_key.clone(),
            shared: false,
            expires_at: None,
            created_at: Utc::now(),
        };
        state.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn extend_share(&self, id: Uuid, candidate: DateTime<Utc>) -> AppResult<Option<File>> {
        let mut state = self.state.write().await;
        let Some(file) = state.files.get_mut(&id) else {
            return Ok(None);
        };
        file.shared = true;
        file.expires_at = Some(file.expires_at.map_or(candidate, |at| at.max(candidate)));
        Ok(Some(file.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.write().await.files.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use driveshare_core::error::ErrorKind;

    fn root_data(owner: Uuid, name: &str) -> CreateFolder {
        CreateFolder {
            folder_name: name.to_string(),
            display_name: Some(name.to_string()),
            parent_folder_id: None,
            owner_id: owner,
            s3_key: format!("{name}/"),
            is_root: true,
        }
    }

    fn child_data(parent: &Folder, name: &str) -> CreateFolder {
        CreateFolder {
            folder_name: name.to_string(),
            display_name: None,
            parent_folder_id: Some(parent.id),
            owner_id: parent.owner_id,
            s3_key: parent.child_folder_key(name),
            is_root: false,
        }
    }

    fn file_data(parent: &Folder, name: &str) -> CreateFile {
        CreateFile {
            file_name: name.to_string(),
            size: 10,
            file_type: "text/plain".to_string(),
            parent_folder_id: parent.id,
            owner_id: parent.owner_id,
            s3_key: parent.child_file_key(name),
        }
    }

    #[tokio::test]
    async fn test_sibling_names_are_unique() {
        let index = MemoryTreeIndex::new();
        let root = FolderIndex::create(&index, &root_data(Uuid::new_v4(), "ada"))
            .await
            .unwrap();

        FolderIndex::create(&index, &child_data(&root, "Docs")).await.unwrap();
        let err = FolderIndex::create(&index, &child_data(&root, "Docs"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::DuplicateName));
    }

    #[tokio::test]
    async fn test_one_root_per_owner() {
        let index = MemoryTreeIndex::new();
        let owner = Uuid::new_v4();
        FolderIndex::create(&index, &root_data(owner, "ada")).await.unwrap();

        let err = FolderIndex::create(&index, &root_data(owner, "ada2"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(index.folder_count().await, 1);
    }

    #[tokio::test]
    async fn test_extend_share_never_shortens() {
        let index = MemoryTreeIndex::new();
        let root = FolderIndex::create(&index, &root_data(Uuid::new_v4(), "ada"))
            .await
            .unwrap();
        let now = Utc::now();

        let long = now + Duration::hours(24);
        let short = now + Duration::hours(1);
        FolderIndex::extend_share(&index, root.id, "t1", long).await.unwrap();
        let shared = FolderIndex::extend_share(&index, root.id, "t2", short)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(shared.expires_at, Some(long));
        assert_eq!(shared.share_token.as_deref(), Some("t2"));
        assert!(shared.shared);
    }

    #[tokio::test]
    async fn test_share_token_collision_is_conflict() {
        let index = MemoryTreeIndex::new();
        let a = FolderIndex::create(&index, &root_data(Uuid::new_v4(), "a")).await.unwrap();
        let b = FolderIndex::create(&index, &root_data(Uuid::new_v4(), "b")).await.unwrap();
        let at = Utc::now() + Duration::hours(1);

        FolderIndex::extend_share(&index, a.id, "same", at).await.unwrap();
        let err = FolderIndex::extend_share(&index, b.id, "same", at)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_delete_restricted_while_children_exist() {
        let index = MemoryTreeIndex::new();
        let root = FolderIndex::create(&index, &root_data(Uuid::new_v4(), "ada"))
            .await
            .unwrap();
        let docs = FolderIndex::create(&index, &child_data(&root, "Docs")).await.unwrap();
        let file = FileIndex::create(&index, &file_data(&docs, "a.txt")).await.unwrap();

        let err = FolderIndex::delete(&index, docs.id).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));

        assert!(FileIndex::delete(&index, file.id).await.unwrap());
        assert!(FolderIndex::delete(&index, docs.id).await.unwrap());
        assert!(!FolderIndex::delete(&index, docs.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_names_unique_per_folder() {
        let index = MemoryTreeIndex::new();
        let root = FolderIndex::create(&index, &root_data(Uuid::new_v4(), "ada"))
            .await
            .unwrap();
        FileIndex::create(&index, &file_data(&root, "a.txt")).await.unwrap();

        let err = FileIndex::create(&index, &file_data(&root, "a.txt"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::DuplicateName));
        assert_eq!(index.file_count().await, 1);
    }

    #[tokio::test]
    async fn test_file_under_missing_folder_is_not_found() {
        let index = MemoryTreeIndex::new();
        let root = FolderIndex::create(&index, &root_data(Uuid::new_v4(), "ada"))
            .await
            .unwrap();
        let mut ghost = root.clone();
        ghost.id = Uuid::new_v4();

        let err = FileIndex::create(&index, &file_data(&ghost, "a.txt"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
