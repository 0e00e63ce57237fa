//! Course domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Course domain entity
#[derive(Debug, Clone)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub teacher_id: Option<i64>,
    /// Resolved "First Last" of the assigned teacher, if any
    pub teacher_name: Option<String>,
}

/// Compact course reference embedded in student projections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CourseRef {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Course creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourse {
    #[validate(length(min = 1, message = "Course name is required"))]
    #[schema(example = "Calculus I")]
    pub name: String,
    /// Course code (unique)
    #[validate(length(min = 1, message = "Course code is required"))]
    #[schema(example = "M101")]
    pub code: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Credits must not be negative"))]
    #[schema(example = 5)]
    pub credits: i32,
    /// Optional department reference; must resolve if supplied
    pub department_id: Option<i64>,
    /// Optional teacher reference; must resolve if supplied
    pub teacher_id: Option<i64>,
}

/// Course update data transfer object. Same shape as creation; the code is
/// re-checked for uniqueness against other courses.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourse {
    #[validate(length(min = 1, message = "Course name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Course code is required"))]
    pub code: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Credits must not be negative"))]
    pub credits: i32,
    pub department_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

/// Course projection returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            code: course.code,
            description: course.description,
            credits: course.credits,
            department_id: course.department_id,
            department_name: course.department_name,
            teacher_id: course.teacher_id,
            teacher_name: course.teacher_name,
        }
    }
}
