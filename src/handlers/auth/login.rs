use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::{verify_password, PLACEHOLDER_TOKEN};
use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::handlers::supplied;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: &'static str,
    pub user: PublicUser,
}

/// POST /api/auth/login - Check credentials and return the user projection
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string", "role": "student" }
/// ```
///
/// An unknown email and a wrong password produce the same message. A role
/// that does not match the account gets its own message.
pub async fn login(
    State(state): State<AppState>,
    Payload(payload): Payload<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let (Some(email), Some(password), Some(role)) = (
        supplied(payload.email),
        supplied(payload.password),
        supplied(payload.role),
    ) else {
        return Err(ApiError::bad_request("All fields required"));
    };

    let Some(user) = state.repo.find_user_by_email(&email).await? else {
        tracing::warn!("Login rejected: unknown email");
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    };

    if !user.has_role(&role) {
        tracing::warn!("Login rejected for user {}: role mismatch", user.id);
        return Err(ApiError::bad_request("Invalid role selected"));
    }

    if !verify_password(password, user.password.clone()).await {
        tracing::warn!("Login rejected for user {}: bad password", user.id);
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    }

    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful",
        token: PLACEHOLDER_TOKEN,
        user: user.into(),
    }))
}
