//! # driveshare-entity
//!
//! Domain entity models for DriveShare. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod share;

pub use file::File;
pub use folder::{Breadcrumb, Folder, FolderTree, Subtree, TreeEntry};
pub use share::{ShareLink, ShareStatus, SharedFileAccess, SharedFileUrl};
