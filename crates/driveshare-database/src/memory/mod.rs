//! In-process backend for development mode and tests.
//!
//! Selected with `database.url = "memory://"`. Mirrors the uniqueness and
//! foreign-key behaviour of the PostgreSQL schema so the services behave
//! identically against either backend.

pub mod identity;
pub mod tree;

pub use identity::MemoryIdentityProvider;
pub use tree::MemoryTreeIndex;
