//! Folder domain entities.

pub mod breadcrumb;
pub mod model;
pub mod tree;

pub use breadcrumb::Breadcrumb;
pub use model::{CreateFolder, Folder};
pub use tree::{FolderTree, Subtree, TreeEntry};
