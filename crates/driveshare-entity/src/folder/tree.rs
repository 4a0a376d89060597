//! Folder subtree structures.
//!
//! A [`Subtree`] is the flat, index-shaped result of expanding a folder:
//! every descendant folder in breadth-first order plus every file. It is
//! what recursive delete consumes. [`FolderTree`] is the depth-first
//! listing handed to callers that render the hierarchy. Both are flat, so
//! building, serializing and dropping them never recurses with depth.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Folder;
use crate::file::File;

/// One folder of a [`FolderTree`] with the files directly inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Levels below the listed root; the root is at depth 0.
    pub depth: usize,
    /// Files directly inside this folder.
    pub files: Vec<File>,
}

/// A subtree listed depth-first.
///
/// Every folder follows its parent and precedes its parent's next sibling.
/// Nesting is carried by `depth` and `parent_folder_id`, never by nested
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// Root first, then its descendants in depth-first order.
    pub folders: Vec<TreeEntry>,
}

impl FolderTree {
    /// The folder the listing starts from.
    pub fn root(&self) -> Option<&TreeEntry> {
        self.folders.first()
    }

    /// Looks up the entry for `folder_id`.
    pub fn entry(&self, folder_id: Uuid) -> Option<&TreeEntry> {
        self.folders.iter().find(|e| e.folder.id == folder_id)
    }

    /// Direct children of `folder_id`, in listing order.
    pub fn children_of(&self, folder_id: Uuid) -> impl Iterator<Item = &TreeEntry> {
        self.folders
            .iter()
            .filter(move |e| e.folder.parent_folder_id == Some(folder_id))
    }
}

/// A folder and everything reachable below it, as flat lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtree {
    /// The folder the expansion started from.
    pub root: Folder,
    /// All descendant folders, parents always before their children.
    pub descendants: Vec<Folder>,
    /// All files at every level, including those directly in `root`.
    pub files: Vec<File>,
}

impl Subtree {
    /// Number of folders in the subtree, including the root.
    pub fn folder_count(&self) -> usize {
        self.descendants.len() + 1
    }

    /// Number of files in the subtree.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Descendant folders ordered so every folder precedes its parent.
    pub fn descendants_deepest_first(&self) -> impl Iterator<Item = &Folder> {
        self.descendants.iter().rev()
    }

    /// Lists the subtree depth-first using an explicit stack.
    ///
    /// Siblings keep the order the index returned them in.
    pub fn into_tree(self) -> FolderTree {
        let mut files_by_folder: HashMap<Uuid, Vec<File>> = HashMap::new();
        for file in self.files {
            files_by_folder
                .entry(file.parent_folder_id)
                .or_default()
                .push(file);
        }

        let mut children: HashMap<Uuid, Vec<Folder>> = HashMap::new();
        for folder in self.descendants {
            if let Some(parent_id) = folder.parent_folder_id {
                children.entry(parent_id).or_default().push(folder);
            }
        }

        let mut folders = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((folder, depth)) = stack.pop() {
            if let Some(kids) = children.remove(&folder.id) {
                stack.extend(kids.into_iter().rev().map(|kid| (kid, depth + 1)));
            }
            let files = files_by_folder.remove(&folder.id).unwrap_or_default();
            folders.push(TreeEntry {
                folder,
                depth,
                files,
            });
        }

        FolderTree { folders }
    }
}
