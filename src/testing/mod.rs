//! In-memory repository and request helpers for router tests.
//!
//! The repository mirrors the store's constraints (unique keys, NOT NULL
//! columns, cascade on course delete) so handlers see the same errors they
//! would get from PostgreSQL.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::database::models::{
    Course, CourseSummary, Enrollment, EnrollmentWithCourse, Lesson, LessonCompletion, NewCourse,
    NewLesson, NewUser, ProgressUpdate, QuizQuestion, QuizResult, QuizSubmission, User, UserSummary,
};
use crate::database::{DatabaseError, LmsRepository};
use crate::state::AppState;

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: Vec<User>,
    courses: Vec<Course>,
    lessons: Vec<Lesson>,
    quiz_questions: Vec<QuizQuestion>,
    enrollments: Vec<Enrollment>,
    progress: Vec<(String, String, i32)>,
    quiz_results: Vec<(String, String, QuizResult)>,
    completions: Vec<(String, String, String)>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamps so "latest" ordering is deterministic
    fn tick(&mut self) -> chrono::DateTime<Utc> {
        let id = self.next_id();
        Utc::now() + Duration::milliseconds(i64::from(id))
    }
}

fn not_null(column: &str, value: Option<String>) -> Result<String, DatabaseError> {
    value.ok_or_else(|| {
        DatabaseError::QueryError(format!("null value in column \"{}\" violates not-null constraint", column))
    })
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like a lost connection
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("connection refused".to_string()));
        }
        Ok(())
    }

    pub async fn add_quiz_question(&self, course_id: &str, question: &str, options: [&str; 4], correct_answer: i32) {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let [option1, option2, option3, option4] = options.map(str::to_string);
        tables.quiz_questions.push(QuizQuestion {
            id,
            course_id: course_id.to_string(),
            question: question.to_string(),
            option1,
            option2,
            option3,
            option4,
            correct_answer,
        });
    }

    pub async fn progress_rows(&self, student_email: &str, course_id: &str) -> Vec<i32> {
        let tables = self.tables.lock().await;
        tables
            .progress
            .iter()
            .filter(|(email, course, _)| email == student_email && course == course_id)
            .map(|(_, _, value)| *value)
            .collect()
    }

    pub async fn stored_password(&self, email: &str) -> Option<String> {
        let tables = self.tables.lock().await;
        tables.users.iter().find(|u| u.email == email).map(|u| u.password.clone())
    }
}

#[async_trait]
impl LmsRepository for MemoryRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }
        let id = tables.next_id();
        let created_at = tables.tick();
        tables.users.push(User {
            id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            created_at,
        });
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .rev()
            .map(|u| UserSummary {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                role: u.role.clone(),
                created_at: u.created_at,
            })
            .collect())
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .courses
            .iter()
            .rev()
            .map(|c| CourseSummary {
                course: c.clone(),
                lesson_count: tables.lessons.iter().filter(|l| l.course_id == c.id).count() as i64,
            })
            .collect())
    }

    async fn find_course(&self, id: &str) -> Result<Option<Course>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn course_lessons(&self, course_id: &str) -> Result<Vec<Lesson>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        let mut lessons: Vec<Lesson> = tables.lessons.iter().filter(|l| l.course_id == course_id).cloned().collect();
        lessons.sort_by_key(|l| l.position);
        Ok(lessons)
    }

    async fn course_quiz(&self, course_id: &str) -> Result<Vec<QuizQuestion>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables.quiz_questions.iter().filter(|q| q.course_id == course_id).cloned().collect())
    }

    async fn create_course(&self, course: NewCourse) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        if tables.courses.iter().any(|c| c.id == course.id) {
            return Err(DatabaseError::UniqueViolation("courses_pkey".to_string()));
        }
        let created_at = tables.tick();
        tables.courses.push(Course {
            id: course.id,
            title: course.title,
            description: course.description,
            level: course.level,
            created_by: course.created_by,
            created_at,
        });
        Ok(())
    }

    async fn delete_course(&self, id: &str) -> Result<u64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        let removed = (before - tables.courses.len()) as u64;
        if removed > 0 {
            tables.lessons.retain(|l| l.course_id != id);
            tables.quiz_questions.retain(|q| q.course_id != id);
            tables.enrollments.retain(|e| e.course_id != id);
        }
        Ok(removed)
    }

    async fn create_lesson(&self, lesson: NewLesson) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        if tables.lessons.iter().any(|l| l.id == lesson.id) {
            return Err(DatabaseError::UniqueViolation("lessons_pkey".to_string()));
        }
        tables.lessons.push(Lesson {
            id: lesson.id,
            course_id: lesson.course_id,
            title: lesson.title,
            description: lesson.description,
            url: lesson.url,
            position: lesson.position,
        });
        Ok(())
    }

    async fn delete_lesson(&self, id: &str) -> Result<u64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        let before = tables.lessons.len();
        tables.lessons.retain(|l| l.id != id);
        Ok((before - tables.lessons.len()) as u64)
    }

    async fn create_enrollment(&self, student_email: &str, course_id: &str) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        if tables
            .enrollments
            .iter()
            .any(|e| e.student_email == student_email && e.course_id == course_id)
        {
            return Err(DatabaseError::UniqueViolation("enrollments_student_email_course_id_key".to_string()));
        }
        let id = tables.next_id();
        let enrolled_at = tables.tick();
        tables.enrollments.push(Enrollment {
            id,
            student_email: student_email.to_string(),
            course_id: course_id.to_string(),
            enrolled_at,
        });
        Ok(())
    }

    async fn list_enrollments(&self, student_email: &str) -> Result<Vec<EnrollmentWithCourse>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .enrollments
            .iter()
            .filter(|e| e.student_email == student_email)
            .filter_map(|e| {
                tables.courses.iter().find(|c| c.id == e.course_id).map(|c| EnrollmentWithCourse {
                    enrollment: e.clone(),
                    title: c.title.clone(),
                    description: c.description.clone(),
                    level: c.level.clone(),
                })
            })
            .collect())
    }

    async fn delete_enrollment(
        &self,
        student_email: Option<&str>,
        course_id: Option<&str>,
    ) -> Result<u64, DatabaseError> {
        self.check()?;
        let (Some(student_email), Some(course_id)) = (student_email, course_id) else {
            // NULL never compares equal
            return Ok(0);
        };
        let mut tables = self.tables.lock().await;
        let before = tables.enrollments.len();
        tables
            .enrollments
            .retain(|e| !(e.student_email == student_email && e.course_id == course_id));
        Ok((before - tables.enrollments.len()) as u64)
    }

    async fn upsert_progress(&self, update: ProgressUpdate) -> Result<(), DatabaseError> {
        self.check()?;
        let value = update.value()?;
        let email = not_null("student_email", update.student_email)?;
        let course = not_null("course_id", update.course_id)?;
        let mut tables = self.tables.lock().await;
        match tables.progress.iter_mut().find(|(e, c, _)| *e == email && *c == course) {
            Some(row) => row.2 = value,
            None => tables.progress.push((email, course, value)),
        }
        Ok(())
    }

    async fn find_progress(&self, student_email: &str, course_id: &str) -> Result<Option<i32>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .progress
            .iter()
            .find(|(e, c, _)| e == student_email && c == course_id)
            .map(|(_, _, value)| *value))
    }

    async fn insert_quiz_result(&self, submission: QuizSubmission) -> Result<(), DatabaseError> {
        self.check()?;
        let score = submission.score()?.ok_or_else(|| DatabaseError::QueryError("null score".to_string()))?;
        let total = submission.total()?.ok_or_else(|| DatabaseError::QueryError("null total".to_string()))?;
        let email = not_null("student_email", submission.student_email)?;
        let course = not_null("course_id", submission.course_id)?;
        let mut tables = self.tables.lock().await;
        let submitted_at = tables.tick();
        tables.quiz_results.push((email, course, QuizResult { score, total, submitted_at }));
        Ok(())
    }

    async fn latest_quiz_result(
        &self,
        student_email: &str,
        course_id: &str,
    ) -> Result<Option<QuizResult>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .quiz_results
            .iter()
            .filter(|(e, c, _)| e == student_email && c == course_id)
            .map(|(_, _, result)| result)
            .max_by_key(|result| result.submitted_at)
            .cloned())
    }

    async fn insert_lesson_completion(&self, completion: LessonCompletion) -> Result<(), DatabaseError> {
        self.check()?;
        let email = not_null("student_email", completion.student_email)?;
        let course = not_null("course_id", completion.course_id)?;
        let lesson = not_null("lesson_id", completion.lesson_id)?;
        let mut tables = self.tables.lock().await;
        if tables
            .completions
            .iter()
            .any(|(e, c, l)| *e == email && *c == course && *l == lesson)
        {
            return Err(DatabaseError::UniqueViolation("lesson_completions_unique".to_string()));
        }
        tables.completions.push((email, course, lesson));
        Ok(())
    }

    async fn completed_lessons(&self, student_email: &str, course_id: &str) -> Result<Vec<String>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .completions
            .iter()
            .filter(|(e, c, _)| e == student_email && c == course_id)
            .map(|(_, _, lesson)| lesson.clone())
            .collect())
    }
}

/// Config with the cheapest bcrypt cost so auth tests stay fast
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.bcrypt_cost = 4;
    config
}

/// Router wired to a fresh in-memory repository
pub fn test_app() -> (Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new());
    let state = AppState::new(repo.clone(), test_config());
    (crate::routes::app(state), repo)
}

/// Issue one request and decode the JSON response
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, json)
}
