use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{CourseDetail, CourseSummary, NewCourse};
use crate::error::ApiError;
use crate::handlers::supplied;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateCourseRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub created_by: Option<String>,
}

/// GET /api/courses - all courses, newest first, with lesson counts
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CourseSummary>> {
    let courses = state.repo.list_courses().await?;
    Ok(ApiResponse::success(courses))
}

/// GET /api/courses/:id - course with ordered lessons and quiz
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<CourseDetail> {
    let course = state
        .repo
        .find_course(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let lessons = state.repo.course_lessons(&id).await?;
    let questions = state.repo.course_quiz(&id).await?;

    Ok(ApiResponse::success(CourseDetail::new(course, lessons, questions)))
}

/// POST /api/courses - create a course with a caller-chosen id
pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<CreateCourseRequest>,
) -> ApiResult<Value> {
    let (Some(id), Some(title), Some(created_by)) = (
        supplied(payload.id),
        supplied(payload.title),
        supplied(payload.created_by),
    ) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    state
        .repo
        .create_course(NewCourse {
            id: id.clone(),
            title,
            description: payload.description,
            level: payload.level,
            created_by,
        })
        .await?;

    tracing::info!("Created course {}", id);
    Ok(ApiResponse::created(json!({
        "message": "Course created successfully",
        "id": id
    })))
}

/// DELETE /api/courses/:id - succeeds whether or not the course existed
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let removed = state.repo.delete_course(&id).await?;
    tracing::debug!("Deleted course {} ({} rows)", id, removed);
    Ok(ApiResponse::message("Course deleted"))
}
