//! Bearer token verification.
//!
//! Tokens are minted by the identity provider; this crate only checks the
//! signature and expiry and reads the subject.

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
