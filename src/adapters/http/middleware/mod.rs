//! HTTP middleware for axum.
//!
//! - `admin_auth` - Shared-secret check for administrative endpoints

pub mod admin_auth;

pub use admin_auth::{require_admin_token, ADMIN_TOKEN_HEADER};
