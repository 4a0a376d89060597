//! Subtree membership by parent-chain walking.
//!
//! Descendants of a shared folder are never tagged; a file is inside the
//! share when walking up from its folder reaches the shared folder. Expiring
//! the one folder-level token therefore revokes the whole subtree at once.

use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_database::index::FolderIndex;
use driveshare_entity::file::File;
use driveshare_entity::folder::Folder;

use crate::folder::ancestry::walk_up;

/// Whether `file` lies anywhere below `shared_root`.
///
/// A chain that ends at some other root yields `false`; a chain that cannot
/// be resolved fails with `BrokenHierarchy`.
pub async fn is_within_shared_folder(
    folders: &dyn FolderIndex,
    shared_root: &Folder,
    file: &File,
    max_depth: usize,
) -> AppResult<bool> {
    if file.parent_folder_id == shared_root.id {
        return Ok(true);
    }

    let Some(parent) = folders.find_by_id(file.parent_folder_id).await? else {
        return Err(AppError::broken_hierarchy(format!(
            "File {} references missing folder {}",
            file.id, file.parent_folder_id
        )));
    };

    let chain = walk_up(folders, parent, Some(shared_root.id), max_depth).await?;
    Ok(chain.last().is_some_and(|top| top.id == shared_root.id))
}
