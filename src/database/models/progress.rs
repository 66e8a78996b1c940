use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::database::manager::DatabaseError;

// Student-side writes are passed through unvalidated; absent keys bind as NULL
// and the store's NOT NULL constraints reject them.

/// Integer column value exactly as the client sent it.
///
/// Any JSON number is accepted and rounded; numeric strings are parsed the
/// same way. Anything else fails at write time like a bad INT literal would.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IntColumn(Option<Value>);

impl IntColumn {
    pub fn to_i32(&self, column: &str) -> Result<Option<i32>, DatabaseError> {
        let number = match &self.0 {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        let rounded = number.filter(|n| n.is_finite()).map(f64::round).ok_or_else(|| {
            DatabaseError::QueryError(format!("invalid input for integer column \"{}\"", column))
        })?;

        if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
            return Err(DatabaseError::QueryError(format!(
                "value for integer column \"{}\" is out of range",
                column
            )));
        }
        Ok(Some(rounded as i32))
    }
}

impl From<Value> for IntColumn {
    fn from(value: Value) -> Self {
        Self(Some(value))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdate {
    pub student_email: Option<String>,
    pub course_id: Option<String>,
    #[serde(default)]
    pub progress: IntColumn,
}

impl ProgressUpdate {
    /// Missing progress is recorded as zero
    pub fn value(&self) -> Result<i32, DatabaseError> {
        Ok(self.progress.to_i32("progress")?.unwrap_or(0))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizSubmission {
    pub student_email: Option<String>,
    pub course_id: Option<String>,
    #[serde(default)]
    pub score: IntColumn,
    #[serde(default)]
    pub total: IntColumn,
}

impl QuizSubmission {
    pub fn score(&self) -> Result<Option<i32>, DatabaseError> {
        self.score.to_i32("score")
    }

    pub fn total(&self) -> Result<Option<i32>, DatabaseError> {
        self.total.to_i32("total")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LessonCompletion {
    pub student_email: Option<String>,
    pub course_id: Option<String>,
    pub lesson_id: Option<String>,
}

/// Latest attempt as shown to the student
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizResult {
    pub score: i32,
    pub total: i32,
    pub submitted_at: DateTime<Utc>,
}
