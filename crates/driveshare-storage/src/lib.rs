//! # driveshare-storage
//!
//! Object Store Adapter implementations for DriveShare: an S3-compatible
//! provider, an in-process provider for development and tests, and the
//! deadline decorator every provider is wrapped in.

pub mod manager;
pub mod providers;
pub mod timeout;

pub use manager::build_storage;
pub use timeout::TimeoutStorage;
