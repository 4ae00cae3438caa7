//! Duty Routes
//!
//! CRUD operations for duties.
//!
//! Routes:
//! - GET /api/todos - List all duties, newest first
//! - POST /api/todos - Create a duty
//! - PUT /api/todos/:id - Rename a duty
//! - DELETE /api/todos/:id - Delete a duty

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{debug, info};

use crate::db::{self, Duty};
use crate::models::{DutyId, DutyInput, DutyName, MessageResponse};
use crate::{AppState, Error, Result};

/// Build duty routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_duties).post(create_duty))
        .route("/:id", put(update_duty).delete(delete_duty))
}

/// Pull the candidate name out of a request body.
///
/// A body that is not JSON, or whose `name` is not a string, counts as a
/// missing name.
fn candidate_name(payload: std::result::Result<Json<DutyInput>, JsonRejection>) -> Option<String> {
    match payload {
        Ok(Json(input)) => input.name,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable duty body");
            None
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// List all duties.
///
/// GET /api/todos
#[axum::debug_handler]
async fn list_duties(State(state): State<AppState>) -> Result<Json<Vec<Duty>>> {
    let duties = db::list_duties(&state.db)
        .await
        .map_err(Error::into_fetch_failed)?;

    Ok(Json(duties))
}

/// Create a new duty.
///
/// POST /api/todos
///
/// Returns the stored record, including the generated id.
#[axum::debug_handler]
async fn create_duty(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DutyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Duty>)> {
    let name = DutyName::parse(candidate_name(payload).as_deref())?;

    let duty = db::create_duty(&state.db, &name).await?;
    info!(id = %duty.id, "Created duty");

    Ok((StatusCode::CREATED, Json(duty)))
}

/// Rename a duty.
///
/// PUT /api/todos/:id
///
/// The id is validated before the body is looked at.
#[axum::debug_handler]
async fn update_duty(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<DutyInput>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let id = DutyId::parse(&id)?;
    let name = DutyName::parse(candidate_name(payload).as_deref())?;

    if db::update_duty_name(&state.db, &id, &name).await? == 0 {
        return Err(Error::NotFound("Duty updated failed".into()));
    }
    info!(%id, "Updated duty");

    Ok(Json(MessageResponse::new("Duty updated successfully")))
}

/// Delete a duty.
///
/// DELETE /api/todos/:id
#[axum::debug_handler]
async fn delete_duty(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DutyId::parse(&id)?;

    if db::delete_duty(&state.db, &id).await? == 0 {
        return Err(Error::NotFound("Duty not found".into()));
    }
    info!(%id, "Deleted duty");

    Ok(Json(MessageResponse::new("Duty deleted successfully")))
}
