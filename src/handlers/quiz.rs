use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::database::models::QuizSubmission;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;

/// POST /api/quiz/submit - append an attempt; scores are taken as given
pub async fn submit(
    State(state): State<AppState>,
    Payload(payload): Payload<QuizSubmission>,
) -> ApiResult<Value> {
    state.repo.insert_quiz_result(payload).await?;
    Ok(ApiResponse::created_message("Quiz submitted"))
}

/// GET /api/quiz/result/:email/:course_id - latest attempt, or `{}` if none
pub async fn result(
    State(state): State<AppState>,
    Path((email, course_id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let latest = state.repo.latest_quiz_result(&email, &course_id).await?;

    let body = match latest {
        Some(result) => serde_json::to_value(result).map_err(|e| {
            tracing::error!("Failed to serialize quiz result: {}", e);
            ApiError::internal_server_error("Internal server error")
        })?,
        None => json!({}),
    };

    Ok(ApiResponse::success(body))
}
