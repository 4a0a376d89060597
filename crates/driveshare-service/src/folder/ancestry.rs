//! Parent-chain walking.

use std::collections::HashSet;

use uuid::Uuid;

use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;
use driveshare_database::index::FolderIndex;
use driveshare_entity::folder::Folder;

/// Walk from `start` towards its root, returning the chain `start`-first.
///
/// The walk ends at a folder without a parent, or early at `stop_at`. A
/// parent that does not resolve, a revisited folder, or more than
/// `max_depth` hops all fail with `BrokenHierarchy`.
pub async fn walk_up(
    folders: &dyn FolderIndex,
    start: Folder,
    stop_at: Option<Uuid>,
    max_depth: usize,
) -> AppResult<Vec<Folder>> {
    let mut visited = HashSet::from([start.id]);
    let mut chain = vec![start];

    loop {
        let current = &chain[chain.len() - 1];
        if Some(current.id) == stop_at {
            return Ok(chain);
        }
        let Some(parent_id) = current.parent_folder_id else {
            return Ok(chain);
        };

        if chain.len() > max_depth {
            return Err(AppError::broken_hierarchy(format!(
                "Folder {} is more than {max_depth} levels deep",
                chain[0].id
            )));
        }
        if !visited.insert(parent_id) {
            return Err(AppError::broken_hierarchy(format!(
                "Parent chain of folder {} loops at {parent_id}",
                chain[0].id
            )));
        }

        let parent = folders.find_by_id(parent_id).await?.ok_or_else(|| {
            AppError::broken_hierarchy(format!(
                "Folder {} references missing parent {parent_id}",
                current.id
            ))
        })?;
        chain.push(parent);
    }
}
