//! Core type definitions used across the DriveShare workspace.

pub mod presigned;
pub mod profile;

pub use presigned::PresignedUrl;
pub use profile::UserProfile;
