//! Sharing engine: token issuance, expiry extension, and access through
//! shared folders.

pub mod access;
pub mod expiry;
pub mod link;
pub mod service;

pub use link::LinkService;
pub use service::ShareService;
