use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::PipelineError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `LOOKUP_FAILED`,
    /// `WRITE_FAILED`, `DATABASE_UNAVAILABLE`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "userId must not be empty")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// A read failed before anything was written.
    LookupFailed(String),
    /// A chunk failed and was rolled back. Earlier chunks stay committed.
    WriteFailed(String),
    DatabaseUnavailable(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (status, code, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::LookupFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "LOOKUP_FAILED", msg)
            }
            AppError::WriteFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "WRITE_FAILED", msg),
            AppError::DatabaseUnavailable(detail) => {
                tracing::error!("Database unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DATABASE_UNAVAILABLE",
                    "Database is not reachable".into(),
                )
            }
        };

        (
            status,
            ErrorBody {
                success: false,
                code,
                message,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        tracing::error!(
            error = %err,
            committed_chunks = err.committed_chunks(),
            "Pass-all-assets run failed"
        );
        match err {
            PipelineError::Lookup { .. } => AppError::LookupFailed(err.to_string()),
            PipelineError::Write { .. } => AppError::WriteFailed(err.to_string()),
        }
    }
}
