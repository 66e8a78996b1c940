pub mod course;
pub mod enrollment;
pub mod progress;
pub mod user;

pub use course::{Course, CourseDetail, CourseSummary, Lesson, NewCourse, NewLesson, QuizItem, QuizQuestion};
pub use enrollment::{Enrollment, EnrollmentWithCourse};
pub use progress::{LessonCompletion, ProgressUpdate, QuizResult, QuizSubmission};
pub use user::{NewUser, PublicUser, User, UserSummary};
