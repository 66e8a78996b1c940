use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i32,
    pub student_email: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
}

/// Enrollment joined with the course it points at
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentWithCourse {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub enrollment: Enrollment,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
}
