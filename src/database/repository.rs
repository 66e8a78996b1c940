use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Course, CourseSummary, EnrollmentWithCourse, Lesson, LessonCompletion, NewCourse, NewLesson,
    NewUser, ProgressUpdate, QuizQuestion, QuizResult, QuizSubmission, User, UserSummary,
};

/// Every store operation the HTTP routes perform.
///
/// Each method is one logical statement against the store. Uniqueness is
/// enforced by the store and reported as [`DatabaseError::UniqueViolation`];
/// callers decide what a duplicate means for their route.
#[async_trait]
pub trait LmsRepository: Send + Sync {
    /// Round-trip to the store without touching any table
    async fn health_check(&self) -> Result<(), DatabaseError>;

    // Users

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn create_user(&self, user: NewUser) -> Result<(), DatabaseError>;
    /// Newest first
    async fn list_users(&self) -> Result<Vec<UserSummary>, DatabaseError>;

    // Catalog

    /// Newest first, each with its lesson count
    async fn list_courses(&self) -> Result<Vec<CourseSummary>, DatabaseError>;
    async fn find_course(&self, id: &str) -> Result<Option<Course>, DatabaseError>;
    /// Ordered by position
    async fn course_lessons(&self, course_id: &str) -> Result<Vec<Lesson>, DatabaseError>;
    async fn course_quiz(&self, course_id: &str) -> Result<Vec<QuizQuestion>, DatabaseError>;
    async fn create_course(&self, course: NewCourse) -> Result<(), DatabaseError>;
    /// Returns the number of rows removed
    async fn delete_course(&self, id: &str) -> Result<u64, DatabaseError>;
    async fn create_lesson(&self, lesson: NewLesson) -> Result<(), DatabaseError>;
    async fn delete_lesson(&self, id: &str) -> Result<u64, DatabaseError>;

    // Enrollments

    async fn create_enrollment(&self, student_email: &str, course_id: &str) -> Result<(), DatabaseError>;
    async fn list_enrollments(&self, student_email: &str) -> Result<Vec<EnrollmentWithCourse>, DatabaseError>;
    async fn delete_enrollment(
        &self,
        student_email: Option<&str>,
        course_id: Option<&str>,
    ) -> Result<u64, DatabaseError>;

    // Progress, quizzes and completions

    /// Insert or overwrite the value for the (student, course) pair
    async fn upsert_progress(&self, update: ProgressUpdate) -> Result<(), DatabaseError>;
    async fn find_progress(&self, student_email: &str, course_id: &str) -> Result<Option<i32>, DatabaseError>;
    async fn insert_quiz_result(&self, submission: QuizSubmission) -> Result<(), DatabaseError>;
    /// Most recent attempt by `submitted_at`
    async fn latest_quiz_result(
        &self,
        student_email: &str,
        course_id: &str,
    ) -> Result<Option<QuizResult>, DatabaseError>;
    async fn insert_lesson_completion(&self, completion: LessonCompletion) -> Result<(), DatabaseError>;
    async fn completed_lessons(&self, student_email: &str, course_id: &str) -> Result<Vec<String>, DatabaseError>;
}
