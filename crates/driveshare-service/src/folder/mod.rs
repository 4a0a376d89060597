//! Hierarchy engine: root provisioning, subfolders, subtree fetch and
//! delete, and breadcrumb resolution.

pub mod ancestry;
pub mod delete;
pub mod service;
pub mod tree;

pub use delete::DeletionReport;
pub use service::FolderService;
