use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::hash_password;
use crate::database::models::NewUser;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::supplied;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// POST /api/auth/register - Register new user account
///
/// Expected Input:
/// ```json
/// { "name": "string", "email": "string", "password": "string", "role": "student" }
/// ```
///
/// 400 when any field is missing, 409 when the email is taken.
pub async fn register(
    State(state): State<AppState>,
    Payload(payload): Payload<RegisterRequest>,
) -> ApiResult<Value> {
    let (Some(name), Some(email), Some(password), Some(role)) = (
        supplied(payload.name),
        supplied(payload.email),
        supplied(payload.password),
        supplied(payload.role),
    ) else {
        return Err(ApiError::bad_request("All fields required"));
    };

    if state.repo.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict("Email already exists"));
    }

    let password_hash = hash_password(password, state.config.security.bcrypt_cost).await?;

    let user = NewUser {
        name,
        email: email.clone(),
        password_hash,
        role,
    };

    match state.repo.create_user(user).await {
        Ok(()) => {}
        // Lost the race with a concurrent registration for the same email
        Err(DatabaseError::UniqueViolation(_)) => return Err(ApiError::conflict("Email already exists")),
        Err(e) => return Err(e.into()),
    }

    tracing::info!("Registered user {}", email);
    Ok(ApiResponse::message("User registered successfully"))
}
