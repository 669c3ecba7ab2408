use common::PassOutcome;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassAllAssetsRequest {
    /// Root of the location subtree to pass.
    #[schema(example = 12)]
    pub location_id: i32,
    /// User recorded as the owner of every written check.
    #[schema(example = "auth0|5f1c2d")]
    pub user_id: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PassAllAssetsResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Successfully passed all assets")]
    pub message: String,
    pub summary: PassOutcome,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "ok")]
    pub message: String,
}

pub fn validate_pass_all_assets(req: &PassAllAssetsRequest) -> Result<(), AppError> {
    if req.user_id.trim().is_empty() {
        return Err(AppError::Validation("userId must not be empty".into()));
    }
    Ok(())
}
