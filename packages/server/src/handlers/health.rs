use axum::Json;
use axum::extract::State;

use crate::error::{AppError, ErrorBody};
use crate::models::inspection::HealthResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Check that the database answers",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable (DATABASE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state
        .db
        .ping()
        .await
        .map_err(|e| AppError::DatabaseUnavailable(e.to_string()))?;

    Ok(Json(HealthResponse {
        success: true,
        message: "ok".into(),
    }))
}
