//! API Routes for the duty list
//!
//! This module combines all API routes into a single router and applies
//! the cross-origin policy and request tracing.

mod duties;

use std::time::Duration;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the API router.
///
/// Route structure:
/// - /api/todos - list and create
/// - /api/todos/:id - update and delete
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/todos", duties::routes())
}

/// Permissive cross-origin policy applied to every route.
pub fn cors(max_age: Duration) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
        .max_age(max_age)
}

/// Build the complete application with state and middleware.
pub fn app(state: AppState, cors_max_age: Duration) -> Router {
    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors(cors_max_age))
        .with_state(state)
}
