//! # driveshare-service
//!
//! The folder/file hierarchy and sharing engine. Each service orchestrates
//! the tree index, the object store, and the identity adapter to implement
//! one group of operations.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod naming;
pub mod share;

pub use context::RequestContext;
pub use file::{FileService, UploadFile};
pub use folder::{DeletionReport, FolderService};
pub use share::{LinkService, ShareService};
