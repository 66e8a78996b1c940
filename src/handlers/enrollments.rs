use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::Value;

use crate::database::models::EnrollmentWithCourse;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::supplied;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EnrollmentRequest {
    pub student_email: Option<String>,
    pub course_id: Option<String>,
}

/// POST /api/enrollments - enroll a student in a course
pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<EnrollmentRequest>,
) -> ApiResult<Value> {
    let (Some(student_email), Some(course_id)) = (supplied(payload.student_email), supplied(payload.course_id))
    else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    match state.repo.create_enrollment(&student_email, &course_id).await {
        Ok(()) => {
            tracing::info!("Enrolled {} in {}", student_email, course_id);
            Ok(ApiResponse::created_message("Enrolled successfully"))
        }
        Err(DatabaseError::UniqueViolation(_)) => Err(ApiError::conflict("Already enrolled")),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/enrollments/:email - a student's enrollments with course info
pub async fn list(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Vec<EnrollmentWithCourse>> {
    let enrollments = state.repo.list_enrollments(&email).await?;
    Ok(ApiResponse::success(enrollments))
}

/// DELETE /api/enrollments - the pair comes from the body and is not validated
pub async fn delete(
    State(state): State<AppState>,
    Payload(payload): Payload<EnrollmentRequest>,
) -> ApiResult<Value> {
    state
        .repo
        .delete_enrollment(payload.student_email.as_deref(), payload.course_id.as_deref())
        .await?;
    Ok(ApiResponse::message("Unenrolled"))
}
