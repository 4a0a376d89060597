//! # driveshare-api
//!
//! HTTP API layer for DriveShare built on Axum.
//!
//! Exposes the hierarchy, sharing, and transfer operations as REST
//! endpoints, verifies bearer tokens, and maps [`AppError`] kinds to
//! status codes.
//!
//! [`AppError`]: driveshare_core::error::AppError

pub mod app;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
