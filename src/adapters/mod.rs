//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - Process-local store implementing every persistence port
//! - `postgres` - sqlx-backed repositories and statistics reader
//! - `http` - axum REST API over the application handlers

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
