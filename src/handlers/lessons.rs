use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::{LessonCompletion, NewLesson};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::supplied;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateLessonRequest {
    pub id: Option<String>,
    pub course_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CompletedLessons {
    pub completed_lessons: Vec<String>,
}

/// POST /api/lessons - attach a lesson to a course
pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<CreateLessonRequest>,
) -> ApiResult<Value> {
    let (Some(id), Some(course_id), Some(title)) = (
        supplied(payload.id),
        supplied(payload.course_id),
        supplied(payload.title),
    ) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    state
        .repo
        .create_lesson(NewLesson {
            id,
            course_id,
            title,
            description: payload.description,
            url: payload.url,
            position: payload.position.unwrap_or(0),
        })
        .await?;

    Ok(ApiResponse::created_message("Lesson created"))
}

/// DELETE /api/lessons/:id - succeeds whether or not the lesson existed
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    state.repo.delete_lesson(&id).await?;
    Ok(ApiResponse::message("Lesson deleted"))
}

/// POST /api/lessons/complete - mark a lesson finished for a student
///
/// A repeat completion is reported as success ("Already completed", 200),
/// unlike enrollments where a repeat is a 409.
pub async fn complete(
    State(state): State<AppState>,
    Payload(payload): Payload<LessonCompletion>,
) -> ApiResult<Value> {
    match state.repo.insert_lesson_completion(payload).await {
        Ok(()) => Ok(ApiResponse::created_message("Lesson marked as complete")),
        Err(DatabaseError::UniqueViolation(_)) => Ok(ApiResponse::message("Already completed")),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/lessons/completed/:email/:course_id - ids of finished lessons
pub async fn completed(
    State(state): State<AppState>,
    Path((email, course_id)): Path<(String, String)>,
) -> ApiResult<CompletedLessons> {
    let completed_lessons = state.repo.completed_lessons(&email, &course_id).await?;
    Ok(ApiResponse::success(CompletedLessons { completed_lessons }))
}
