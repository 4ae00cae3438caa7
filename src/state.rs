//! Application state for the duty list service.
//!
//! Contains the shared state that is passed to all handlers.

use crate::db::DbPool;

/// Application state shared across all handlers.
///
/// The pool is built once at startup and injected here; handlers never
/// reach the store any other way.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}
