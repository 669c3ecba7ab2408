use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Json<T>` wrapper that turns malformed or incomplete request bodies into
/// `AppError::Validation`, so clients get the usual `{ success: false, ... }`
/// envelope instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection_message(&rejection)))?;
        Ok(AppJson(value))
    }
}

/// `"userId is required"` for a missing field, the raw rejection text otherwise.
fn rejection_message(rejection: &JsonRejection) -> String {
    let detail = rejection.body_text();
    if let JsonRejection::JsonDataError(_) = rejection {
        if let Some(field) = missing_field(&detail) {
            return format!("{field} is required");
        }
    }
    format!("Error parsing request body: {detail}")
}

fn missing_field(detail: &str) -> Option<&str> {
    const MARKER: &str = "missing field `";
    let start = detail.find(MARKER)? + MARKER.len();
    detail[start..].split('`').next()
}
