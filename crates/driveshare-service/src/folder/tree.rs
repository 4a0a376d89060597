//! Breadth-first subtree collection.

use std::collections::{HashSet, VecDeque};

use tracing::warn;

use driveshare_core::result::AppResult;
use driveshare_database::index::{FileIndex, FolderIndex};
use driveshare_entity::folder::{Folder, Subtree};

/// Expand `root` into its full subtree with an explicit worklist.
///
/// Descendants come out in breadth-first order, so every folder appears
/// after its parent. A child reached twice is skipped.
pub async fn collect_subtree(
    folders: &dyn FolderIndex,
    files: &dyn FileIndex,
    root: Folder,
) -> AppResult<Subtree> {
    let mut visited = HashSet::from([root.id]);
    let mut queue = VecDeque::from([root.id]);
    let mut descendants = Vec::new();
    let mut all_files = Vec::new();

    while let Some(folder_id) = queue.pop_front() {
        all_files.extend(files.find_by_folder(folder_id).await?);

        for child in folders.find_children(folder_id).await? {
            if !visited.insert(child.id) {
                warn!(folder_id = %child.id, "Folder reached twice during subtree walk");
                continue;
            }
            queue.push_back(child.id);
            descendants.push(child);
        }
    }

    Ok(Subtree {
        root,
        descendants,
        files: all_files,
    })
}
