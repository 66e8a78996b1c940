use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::Value;

use crate::database::models::ProgressUpdate;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProgressBody {
    pub progress: i32,
}

/// POST /api/progress - insert or overwrite progress for a (student, course) pair
pub async fn update(
    State(state): State<AppState>,
    Payload(payload): Payload<ProgressUpdate>,
) -> ApiResult<Value> {
    state.repo.upsert_progress(payload).await?;
    Ok(ApiResponse::message("Progress updated"))
}

/// GET /api/progress/:email/:course_id - zero when nothing was recorded
pub async fn get(
    State(state): State<AppState>,
    Path((email, course_id)): Path<(String, String)>,
) -> ApiResult<ProgressBody> {
    let progress = state.repo.find_progress(&email, &course_id).await?.unwrap_or(0);
    Ok(ApiResponse::success(ProgressBody { progress }))
}
