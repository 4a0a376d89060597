//! # driveshare-database
//!
//! The Tree Index: the [`FolderIndex`] and [`FileIndex`] contracts, their
//! PostgreSQL repositories, the Postgres identity adapter, and an
//! in-memory backend with the same constraint behaviour.

pub mod backend;
pub mod connection;
pub mod index;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use backend::IndexBackend;
pub use connection::DatabasePool;
pub use index::{FileIndex, FolderIndex};
