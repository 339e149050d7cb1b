//! In-memory persistence adapter.
//!
//! Implements every persistence port over a single lock-protected state.
//! Used by tests and by the `memory` storage backend.

mod store;

pub use store::InMemoryStore;
