use axum::Json;
use axum::extract::State;
use common::PassAllAssets;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::inspection::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/pass-all-assets",
    tag = "Inspections",
    operation_id = "passAllAssets",
    summary = "Pass every asset under a location",
    description = "Expands the location to all of its descendants and writes a fresh AssetCheck \
        tree, defaulted to `pass`, for every asset found there. Assets are written in chunks, one \
        transaction per chunk. If a chunk fails it is rolled back and the run stops, but chunks \
        committed before it are kept. Repeated calls are not deduplicated.",
    request_body = PassAllAssetsRequest,
    responses(
        (status = 200, description = "All assets passed", body = PassAllAssetsResponse),
        (status = 400, description = "Malformed body or blank userId (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "A lookup or write failed (LOOKUP_FAILED, WRITE_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(location_id = payload.location_id, user_id = %payload.user_id))]
pub async fn pass_all_assets(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PassAllAssetsRequest>,
) -> Result<Json<PassAllAssetsResponse>, AppError> {
    validate_pass_all_assets(&payload)?;

    let store = state.inspection_store();
    let summary = PassAllAssets::new(&store)
        .with_chunk_size(state.config.inspection.chunk_size)
        .run(payload.location_id, &payload.user_id)
        .await?;

    Ok(Json(PassAllAssetsResponse {
        success: true,
        message: "Successfully passed all assets".into(),
        summary,
    }))
}
