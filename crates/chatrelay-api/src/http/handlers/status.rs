//! Status check HTTP handlers.
//!
//! Endpoints:
//! - POST /api/status - Record a status check
//! - GET  /api/status - List recorded status checks

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use chatrelay_types::status::StatusCheck;

use crate::http::error::AppError;
use crate::http::extractors::ValidatedJson;
use crate::state::AppState;

/// Request body for recording a status check.
#[derive(Debug, Deserialize, Validate)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// POST /api/status - Record a status check for a client.
pub async fn create_status_check(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, AppError> {
    let check = state.status_service.record(body.client_name).await?;
    Ok(Json(check))
}

/// GET /api/status - List status checks, oldest first.
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    Ok(Json(state.status_service.list().await?))
}
