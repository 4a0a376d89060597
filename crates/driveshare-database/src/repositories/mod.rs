//! PostgreSQL repository implementations.

pub mod file;
pub mod folder;
pub mod identity;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use identity::IdentityRepository;
