//! # driveshare-core
//!
//! Core crate for DriveShare. Contains the contracts for the external
//! collaborators (object storage, identity), configuration schemas,
//! shared value types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DriveShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
