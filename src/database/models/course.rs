use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Course row plus the number of lessons attached to it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub course: Course,
    pub lesson_count: i64,
}

/// Course with its ordered lessons and quiz, as served by the detail route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub lessons: Vec<Lesson>,
    pub quiz: Vec<QuizItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub position: i32,
}

/// `quiz_questions` row; options are stored as four columns
#[derive(Debug, Clone, FromRow)]
pub struct QuizQuestion {
    pub id: i32,
    pub course_id: String,
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub correct_answer: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "answerIndex")]
    pub answer_index: i32,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub position: i32,
}

impl From<QuizQuestion> for QuizItem {
    fn from(q: QuizQuestion) -> Self {
        Self {
            question: q.question,
            options: vec![q.option1, q.option2, q.option3, q.option4],
            answer_index: q.correct_answer,
        }
    }
}

impl CourseDetail {
    pub fn new(course: Course, lessons: Vec<Lesson>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            course,
            lessons,
            quiz: questions.into_iter().map(QuizItem::from).collect(),
        }
    }
}
