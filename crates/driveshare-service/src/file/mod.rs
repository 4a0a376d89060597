//! File transfer operations: upload, presigned retrieval, delete.

pub mod service;

pub use service::{FileService, UploadFile};
