//! Folder operations scoped to the authenticated owner.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};
use uuid::Uuid;

use driveshare_core::config::HierarchyConfig;
use driveshare_core::error::{AppError, ErrorKind};
use driveshare_core::result::AppResult;
use driveshare_core::traits::{IdentityProvider, ROOT_FOLDER_ATTRIBUTE, StorageProvider};
use driveshare_core::types::UserProfile;
use driveshare_database::index::{FileIndex, FolderIndex};
use driveshare_entity::folder::{Breadcrumb, CreateFolder, Folder, Subtree};

use super::ancestry::walk_up;
use super::delete::DeletionReport;
use super::tree::collect_subtree;
use crate::context::RequestContext;
use crate::naming::{root_folder_name, suffixed_root_name, validate_name};

/// Manages the folder hierarchy.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder rows.
    folders: Arc<dyn FolderIndex>,
    /// File rows.
    files: Arc<dyn FileIndex>,
    /// Object store.
    storage: Arc<dyn StorageProvider>,
    /// Identity adapter.
    identity: Arc<dyn IdentityProvider>,
    /// Hop bound for parent-chain walks.
    max_depth: usize,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderIndex>,
        files: Arc<dyn FileIndex>,
        storage: Arc<dyn StorageProvider>,
        identity: Arc<dyn IdentityProvider>,
        config: &HierarchyConfig,
    ) -> Self {
        Self {
            folders,
            files,
            storage,
            identity,
            max_depth: config.max_depth,
        }
    }

    /// Hop bound applied to every parent-chain walk.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the caller's root folder, creating it on first use.
    ///
    /// Idempotent: a recorded root is returned unchanged, and a root that
    /// exists in the index but is missing from the identity attributes is
    /// re-linked instead of duplicated.
    pub async fn create_root_folder(&self, ctx: &RequestContext) -> AppResult<Folder> {
        let user_id = ctx.user_id;
        if let Some(root) = self.resolve_root(user_id).await? {
            debug!(user_id = %user_id, folder_id = %root.id, "Root folder already provisioned");
            return Ok(root);
        }

        let label = self.profile_of(user_id).await?.display_label();
        let mut name = root_folder_name(&label);
        if self.folders.find_by_s3_key(&format!("{name}/")).await?.is_some() {
            name = suffixed_root_name(&name, user_id);
        }
        let s3_key = format!("{name}/");

        self.storage.put(&s3_key, Bytes::new(), None).await?;

        let data = CreateFolder {
            folder_name: name,
            display_name: Some(label),
            parent_folder_id: None,
            owner_id: user_id,
            s3_key,
            is_root: true,
        };
        let root = match self.folders.create(&data).await {
            Ok(root) => root,
            Err(e) if e.is(ErrorKind::Conflict) || e.is(ErrorKind::DuplicateName) => {
                // A concurrent request provisioned the root first.
                match self.folders.find_root_by_owner(user_id).await? {
                    Some(root) => root,
                    None => return Err(e),
                }
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    s3_key = %data.s3_key,
                    error = %e,
                    "Root folder insert failed; placeholder object left in storage"
                );
                return Err(e);
            }
        };

        self.link_root(user_id, &root).await;

        info!(
            user_id = %user_id,
            folder_id = %root.id,
            s3_key = %root.s3_key,
            "Root folder created"
        );
        Ok(root)
    }

    /// Creates a subfolder named `name` under `parent_id`.
    ///
    /// The placeholder object is written before the row. If the row insert
    /// fails afterwards the placeholder stays behind as garbage.
    pub async fn create_subfolder(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
        name: &str,
    ) -> AppResult<Folder> {
        let name = validate_name("Folder", name)?;
        let parent = self.get_folder(ctx, parent_id).await?;

        let parent_depth = self.depth_of(&parent).await?;
        if parent_depth >= self.max_depth {
            return Err(AppError::validation(format!(
                "Folders cannot be nested more than {} levels below the root",
                self.max_depth
            )));
        }

        if self.folders.find_child_by_name(parent.id, &name).await?.is_some() {
            return Err(AppError::duplicate_name(format!(
                "A folder named '{name}' already exists here"
            )));
        }

        let s3_key = parent.child_folder_key(&name);
        self.storage.put(&s3_key, Bytes::new(), None).await?;

        let data = CreateFolder {
            folder_name: name,
            display_name: None,
            parent_folder_id: Some(parent.id),
            owner_id: parent.owner_id,
            s3_key,
            is_root: false,
        };
        let folder = self.folders.create(&data).await.map_err(|e| {
            warn!(
                parent_id = %parent.id,
                s3_key = %data.s3_key,
                error = %e,
                "Folder insert failed; placeholder object left in storage"
            );
            e
        })?;

        info!(
            folder_id = %folder.id,
            parent_id = %parent.id,
            s3_key = %folder.s3_key,
            "Folder created"
        );
        Ok(folder)
    }

    /// Levels between `folder` and its root; a root is at depth 0.
    async fn depth_of(&self, folder: &Folder) -> AppResult<usize> {
        let chain = walk_up(self.folders.as_ref(), folder.clone(), None, self.max_depth).await?;
        Ok(chain.len() - 1)
    }

    /// Gets a folder owned by the caller.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self.find_folder(folder_id).await?;
        if folder.owner_id != ctx.user_id {
            return Err(AppError::unauthorized(format!(
                "Folder {folder_id} belongs to another user"
            )));
        }
        Ok(folder)
    }

    /// Gets a folder regardless of owner.
    pub async fn find_folder(&self, folder_id: Uuid) -> AppResult<Folder> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Gets a folder with every descendant folder and file.
    pub async fn get_folder_recursively(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Subtree> {
        let folder = self.get_folder(ctx, folder_id).await?;
        self.subtree_of(folder).await
    }

    /// Expands an already-authorized folder into its subtree.
    pub async fn subtree_of(&self, folder: Folder) -> AppResult<Subtree> {
        collect_subtree(self.folders.as_ref(), self.files.as_ref(), folder).await
    }

    /// Deletes a folder and everything below it.
    ///
    /// Files go first, then folders deepest-first, then the folder itself.
    /// For each item the object is deleted before the row. Object failures
    /// are logged and reported; row failures abort the operation.
    pub async fn delete_folder_recursively(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<DeletionReport> {
        let folder = self.get_folder(ctx, folder_id).await?;
        let subtree = self.subtree_of(folder).await?;
        let mut report = DeletionReport::default();

        for file in &subtree.files {
            self.remove_object(&file.s3_key, &mut report).await;
            if self.files.delete(file.id).await? {
                report.files_removed += 1;
            }
        }

        for folder in subtree
            .descendants_deepest_first()
            .chain(std::iter::once(&subtree.root))
        {
            self.remove_object(&folder.s3_key, &mut report).await;
            if self.folders.delete(folder.id).await? {
                report.folders_removed += 1;
            }
        }

        info!(
            folder_id = %folder_id,
            folders_removed = report.folders_removed,
            files_removed = report.files_removed,
            storage_leaks = report.storage_leaks.len(),
            "Folder subtree deleted"
        );
        Ok(report)
    }

    /// Breadcrumbs from the caller's root down to `folder_id`, root first.
    ///
    /// Without a folder, returns just the caller's root. Any break in the
    /// parent chain fails the whole call; no partial trail is returned.
    pub async fn get_ancestors(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<Breadcrumb>> {
        let user_id = ctx.user_id;

        let Some(folder_id) = folder_id else {
            let root = self
                .resolve_root(user_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User {user_id} has no root folder")))?;
            let label = self.root_label(&root).await?;
            return Ok(vec![Breadcrumb::new(root.id, label)]);
        };

        let target = self.get_folder(ctx, folder_id).await?;
        let mut chain = walk_up(self.folders.as_ref(), target, None, self.max_depth).await?;

        let Some(top) = chain.last() else {
            return Err(AppError::internal("Empty ancestor chain"));
        };
        if !top.is_root || top.owner_id != user_id {
            return Err(AppError::broken_hierarchy(format!(
                "Folder {folder_id} does not lead to a root owned by {user_id}"
            )));
        }

        chain.reverse();
        let mut trail = Vec::with_capacity(chain.len());
        for folder in &chain {
            let label = if folder.is_root {
                self.root_label(folder).await?
            } else {
                folder.folder_name.clone()
            };
            trail.push(Breadcrumb::new(folder.id, label));
        }
        Ok(trail)
    }

    /// Looks up the caller's root: the identity attribute first, then the index.
    async fn resolve_root(&self, user_id: Uuid) -> AppResult<Option<Folder>> {
        if let Some(raw) = self
            .identity
            .get_attribute(user_id, ROOT_FOLDER_ATTRIBUTE)
            .await?
        {
            if let Ok(root_id) = Uuid::parse_str(&raw) {
                if let Some(root) = self.folders.find_by_id(root_id).await? {
                    if root.is_root && root.owner_id == user_id {
                        return Ok(Some(root));
                    }
                }
            }
            debug!(user_id = %user_id, attribute = %raw, "Stale root folder attribute");
        }

        let Some(root) = self.folders.find_root_by_owner(user_id).await? else {
            return Ok(None);
        };
        self.link_root(user_id, &root).await;
        Ok(Some(root))
    }

    /// Records the root in the identity attributes. Failure is tolerated:
    /// the index stays authoritative and the link is repaired on next lookup.
    async fn link_root(&self, user_id: Uuid, root: &Folder) {
        if let Err(e) = self
            .identity
            .set_attribute(user_id, ROOT_FOLDER_ATTRIBUTE, &root.id.to_string())
            .await
        {
            warn!(
                user_id = %user_id,
                folder_id = %root.id,
                error = %e,
                "Failed to record root folder attribute"
            );
        }
    }

    async fn profile_of(&self, user_id: Uuid) -> AppResult<UserProfile> {
        Ok(self
            .identity
            .profile(user_id)
            .await?
            .unwrap_or_else(|| UserProfile::anonymous(user_id)))
    }

    async fn root_label(&self, root: &Folder) -> AppResult<String> {
        match root.display_name.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => Ok(label.to_string()),
            _ => Ok(self.profile_of(root.owner_id).await?.display_label()),
        }
    }

    async fn remove_object(&self, key: &str, report: &mut DeletionReport) {
        if let Err(e) = self.storage.delete(key).await {
            warn!(s3_key = %key, error = %e, "Object delete failed; leaving it in storage");
            report.storage_leaks.push(key.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driveshare_database::memory::{MemoryIdentityProvider, MemoryTreeIndex};
    use driveshare_storage::providers::MemoryStorageProvider;

    fn service() -> (FolderService, MemoryStorageProvider, MemoryIdentityProvider) {
        let index = MemoryTreeIndex::new();
        let storage = MemoryStorageProvider::new("test");
        let identity = MemoryIdentityProvider::new();
        let service = FolderService::new(
            Arc::new(index.clone()),
            Arc::new(index),
            Arc::new(storage.clone()),
            Arc::new(identity.clone()),
            &HierarchyConfig::default(),
        );
        (service, storage, identity)
    }

    #[tokio::test]
    async fn test_anonymous_root_uses_fallback_label() {
        let (service, storage, _) = service();
        let ctx = RequestContext::new(Uuid::new_v4());

        let root = service.create_root_folder(&ctx).await.unwrap();
        assert_eq!(root.folder_name, "My_Drive");
        assert_eq!(root.label(), "My Drive");
        assert!(storage.contains("My_Drive/"));
    }

    #[tokio::test]
    async fn test_subfolder_name_is_trimmed() {
        let (service, storage, _) = service();
        let ctx = RequestContext::new(Uuid::new_v4());
        let root = service.create_root_folder(&ctx).await.unwrap();

        let docs = service.create_subfolder(&ctx, root.id, "  Docs ").await.unwrap();
        assert_eq!(docs.folder_name, "Docs");
        assert_eq!(docs.s3_key, "My_Drive/Docs/");
        assert!(storage.contains("My_Drive/Docs/"));
    }
}
