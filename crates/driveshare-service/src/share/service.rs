//! Folder and file sharing.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use driveshare_core::config::ShareConfig;
use driveshare_core::error::{AppError, ErrorKind};
use driveshare_core::result::AppResult;
use driveshare_core::traits::StorageProvider;
use driveshare_database::index::{FileIndex, FolderIndex};
use driveshare_entity::file::File;
use driveshare_entity::folder::{Folder, FolderTree};
use driveshare_entity::share::{ShareLink, ShareStatus, SharedFileAccess, SharedFileUrl};

use super::access::is_within_shared_folder;
use super::expiry::{expiry_after, presign_ttl};
use super::link::LinkService;
use crate::context::RequestContext;
use crate::folder::FolderService;

/// Attempts at issuing a folder token before giving up on collisions.
const TOKEN_ATTEMPTS: usize = 3;

/// Issues and resolves share links.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Hierarchy engine, for ownership checks and subtree expansion.
    folder_service: Arc<FolderService>,
    /// Folder rows.
    folders: Arc<dyn FolderIndex>,
    /// File rows.
    files: Arc<dyn FileIndex>,
    /// Object store, for presigning.
    storage: Arc<dyn StorageProvider>,
    /// Token generator.
    links: LinkService,
    /// Upper bound on any presigned URL lifetime.
    max_presign_ttl: Duration,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        folder_service: Arc<FolderService>,
        folders: Arc<dyn FolderIndex>,
        files: Arc<dyn FileIndex>,
        storage: Arc<dyn StorageProvider>,
        config: &ShareConfig,
    ) -> Self {
        Self {
            folder_service,
            folders,
            files,
            storage,
            links: LinkService::new(config.token_bytes),
            max_presign_ttl: Duration::from_secs(config.max_presign_ttl_seconds),
        }
    }

    /// Shares a folder for `hours`, returning its public link.
    ///
    /// A fresh token is issued on every call. The expiry only ever moves
    /// forward: re-sharing for a shorter time keeps the later expiry.
    pub async fn share_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        hours: f64,
        origin: &str,
    ) -> AppResult<ShareLink> {
        let candidate = expiry_after(ctx.request_time, hours)?;
        let folder = self.folder_service.get_folder(ctx, folder_id).await?;

        for attempt in 1..=TOKEN_ATTEMPTS {
            let token = self.links.generate_token();
            match self.folders.extend_share(folder.id, &token, candidate).await {
                Ok(Some(shared)) => {
                    let expires_at = shared.expires_at.unwrap_or(candidate);
                    info!(
                        folder_id = %folder.id,
                        expires_at = %expires_at,
                        "Folder shared"
                    );
                    return Ok(ShareLink {
                        url: self.links.folder_url(origin, &token),
                        expires_at,
                    });
                }
                Ok(None) => {
                    return Err(AppError::not_found(format!("Folder {folder_id} not found")));
                }
                Err(e) if e.is(ErrorKind::Conflict) && attempt < TOKEN_ATTEMPTS => {
                    warn!(folder_id = %folder.id, attempt, "Share token collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(format!(
            "Could not issue a unique share token for folder {folder_id}"
        )))
    }

    /// Looks up the folder carrying `token`.
    ///
    /// An expired token still resolves; callers compare `expires_at` with
    /// the current time to tell a stale link from an unknown one.
    pub async fn get_folder_by_share_token(&self, token: &str) -> AppResult<Folder> {
        self.folders
            .find_by_share_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))
    }

    /// Shares a single file for `hours`.
    ///
    /// The returned `expires_at` is the logical share lifetime; the URL
    /// itself is presigned for at most `max_presign_ttl_seconds`.
    pub async fn share_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        hours: f64,
    ) -> AppResult<ShareLink> {
        let candidate = expiry_after(ctx.request_time, hours)?;
        let file = self.owned_file(ctx, file_id).await?;

        let shared = self
            .files
            .extend_share(file.id, candidate)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        let expires_at = shared.expires_at.unwrap_or(candidate);

        let ttl = presign_ttl(ctx.request_time, expires_at, self.max_presign_ttl)
            .unwrap_or(self.max_presign_ttl);
        let presigned = self.storage.presign_get(&shared.s3_key, ttl).await?;

        info!(
            file_id = %file.id,
            expires_at = %expires_at,
            presign_ttl_seconds = ttl.as_secs(),
            "File shared"
        );
        Ok(ShareLink {
            url: presigned.url,
            expires_at,
        })
    }

    /// Decides whether `file` may be served through `shared_root`'s link.
    ///
    /// Stale or never-issued shares are reported before any chain walk; a
    /// file outside the shared subtree is `NotAccessible`.
    pub async fn get_file_from_share_token(
        &self,
        shared_root: &Folder,
        file: &File,
    ) -> AppResult<SharedFileAccess> {
        let now = Utc::now();
        let expires_at = match (shared_root.share_status(now), shared_root.expires_at) {
            (ShareStatus::Active, Some(at)) => at,
            (ShareStatus::Expired, _) => return Ok(SharedFileAccess::Expired),
            _ => return Ok(SharedFileAccess::NotAccessible),
        };

        let inside = is_within_shared_folder(
            self.folders.as_ref(),
            shared_root,
            file,
            self.folder_service.max_depth(),
        )
        .await?;
        if !inside {
            debug!(
                folder_id = %shared_root.id,
                file_id = %file.id,
                "File requested outside the shared subtree"
            );
            return Ok(SharedFileAccess::NotAccessible);
        }

        let Some(ttl) = presign_ttl(now, expires_at, self.max_presign_ttl) else {
            return Ok(SharedFileAccess::Expired);
        };
        let presigned = self.storage.presign_get(&file.s3_key, ttl).await?;

        Ok(SharedFileAccess::Granted(SharedFileUrl {
            url: presigned.url,
            file_name: file.file_name.clone(),
            expires_at: presigned.expires_at,
        }))
    }

    /// Resolves a file by id through a folder share token.
    pub async fn access_shared_file(
        &self,
        token: &str,
        file_id: Uuid,
    ) -> AppResult<SharedFileAccess> {
        let shared_root = self.get_folder_by_share_token(token).await?;
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        self.get_file_from_share_token(&shared_root, &file).await
    }

    /// The full tree of a shared folder, for the public share page.
    pub async fn open_shared_folder(&self, token: &str) -> AppResult<FolderTree> {
        let folder = self.get_folder_by_share_token(token).await?;
        if !folder.share_status(Utc::now()).is_active() {
            return Err(AppError::forbidden("Share link has expired"));
        }
        Ok(self.folder_service.subtree_of(folder).await?.into_tree())
    }

    async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        if file.owner_id != ctx.user_id {
            return Err(AppError::unauthorized(format!(
                "File {file_id} belongs to another user"
            )));
        }
        Ok(file)
    }
}
