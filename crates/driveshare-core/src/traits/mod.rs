//! Contracts for the external collaborators, defined in `driveshare-core`
//! and implemented by other crates.

pub mod identity;
pub mod storage;

pub use identity::{IdentityProvider, ROOT_FOLDER_ATTRIBUTE};
pub use storage::StorageProvider;
