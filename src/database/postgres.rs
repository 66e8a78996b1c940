use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    Course, CourseSummary, EnrollmentWithCourse, Lesson, LessonCompletion, NewCourse, NewLesson,
    NewUser, ProgressUpdate, QuizQuestion, QuizResult, QuizSubmission, User, UserSummary,
};
use crate::database::repository::LmsRepository;

/// PostgreSQL-backed repository.
///
/// Every call checks a connection out of the pool for the length of one
/// statement; sqlx hands it back when the future completes or is dropped.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LmsRepository for PgRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4)")
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.role)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, DatabaseError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email, role, created_at FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>, DatabaseError> {
        let courses = sqlx::query_as::<_, CourseSummary>(
            r#"
            SELECT
                c.id, c.title, c.description, c.level, c.created_by, c.created_at,
                (SELECT COUNT(*) FROM lessons l WHERE l.course_id = c.id) AS lesson_count
            FROM courses c
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn find_course(&self, id: &str) -> Result<Option<Course>, DatabaseError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, title, description, level, created_by, created_at FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn course_lessons(&self, course_id: &str) -> Result<Vec<Lesson>, DatabaseError> {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, course_id, title, description, url, position
            FROM lessons
            WHERE course_id = $1
            ORDER BY position
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons)
    }

    async fn course_quiz(&self, course_id: &str) -> Result<Vec<QuizQuestion>, DatabaseError> {
        let questions = sqlx::query_as::<_, QuizQuestion>(
            r#"
            SELECT id, course_id, question, option1, option2, option3, option4, correct_answer
            FROM quiz_questions
            WHERE course_id = $1
            ORDER BY id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn create_course(&self, course: NewCourse) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO courses (id, title, description, level, created_by) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&course.id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.level)
        .bind(&course.created_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_course(&self, id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_lesson(&self, lesson: NewLesson) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, course_id, title, description, url, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&lesson.id)
        .bind(&lesson.course_id)
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.url)
        .bind(lesson.position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_lesson(&self, id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_enrollment(&self, student_email: &str, course_id: &str) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO enrollments (student_email, course_id) VALUES ($1, $2)")
            .bind(student_email)
            .bind(course_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_enrollments(&self, student_email: &str) -> Result<Vec<EnrollmentWithCourse>, DatabaseError> {
        let enrollments = sqlx::query_as::<_, EnrollmentWithCourse>(
            r#"
            SELECT e.id, e.student_email, e.course_id, e.enrolled_at,
                   c.title, c.description, c.level
            FROM enrollments e
            JOIN courses c ON e.course_id = c.id
            WHERE e.student_email = $1
            ORDER BY e.enrolled_at
            "#,
        )
        .bind(student_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    async fn delete_enrollment(
        &self,
        student_email: Option<&str>,
        course_id: Option<&str>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE student_email = $1 AND course_id = $2")
            .bind(student_email)
            .bind(course_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn upsert_progress(&self, update: ProgressUpdate) -> Result<(), DatabaseError> {
        let progress = update.value()?;

        sqlx::query(
            r#"
            INSERT INTO course_progress (student_email, course_id, progress)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_email, course_id)
            DO UPDATE SET progress = EXCLUDED.progress, updated_at = NOW()
            "#,
        )
        .bind(&update.student_email)
        .bind(&update.course_id)
        .bind(progress)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_progress(&self, student_email: &str, course_id: &str) -> Result<Option<i32>, DatabaseError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT progress FROM course_progress WHERE student_email = $1 AND course_id = $2",
        )
        .bind(student_email)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(progress,)| progress))
    }

    async fn insert_quiz_result(&self, submission: QuizSubmission) -> Result<(), DatabaseError> {
        let (score, total) = (submission.score()?, submission.total()?);

        sqlx::query(
            "INSERT INTO quiz_results (student_email, course_id, score, total) VALUES ($1, $2, $3, $4)",
        )
        .bind(&submission.student_email)
        .bind(&submission.course_id)
        .bind(score)
        .bind(total)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn latest_quiz_result(
        &self,
        student_email: &str,
        course_id: &str,
    ) -> Result<Option<QuizResult>, DatabaseError> {
        let result = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT score, total, submitted_at
            FROM quiz_results
            WHERE student_email = $1 AND course_id = $2
            ORDER BY submitted_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(student_email)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn insert_lesson_completion(&self, completion: LessonCompletion) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO lesson_completions (student_email, course_id, lesson_id) VALUES ($1, $2, $3)",
        )
        .bind(&completion.student_email)
        .bind(&completion.course_id)
        .bind(&completion.lesson_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn completed_lessons(&self, student_email: &str, course_id: &str) -> Result<Vec<String>, DatabaseError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT lesson_id
            FROM lesson_completions
            WHERE student_email = $1 AND course_id = $2
            ORDER BY completed_at
            "#,
        )
        .bind(student_email)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(lesson_id,)| lesson_id).collect())
    }
}
