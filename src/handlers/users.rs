use axum::extract::State;

use crate::database::models::UserSummary;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/users - every account, newest first, without password hashes
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserSummary>> {
    let users = state.repo.list_users().await?;
    Ok(ApiResponse::success(users))
}
