//! Student domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::course::CourseRef;
use super::person::{Account, Person};

/// Student domain entity: shared person fields plus student-specific ones.
#[derive(Debug, Clone)]
pub struct Student {
    pub person: Person,
    pub student_id: String,
    pub year: i32,
    pub address: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    /// Enrolled courses. Populated on detail fetches; list queries leave it
    /// empty to avoid loading every student's enrollments.
    pub courses: Vec<CourseRef>,
}

impl Account for Student {
    fn identity(&self) -> &Person {
        &self.person
    }
}

/// Student creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "mjones")]
    pub username: String,
    /// Plain-text password, hashed before storage (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "mjones@school.edu")]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
    /// Student id (unique among students)
    #[validate(length(min = 1, message = "Student ID is required"))]
    #[schema(example = "S2041")]
    pub student_id: String,
    #[schema(example = 2)]
    pub year: i32,
    pub address: Option<String>,
    /// Optional department reference; must resolve if supplied
    pub department_id: Option<i64>,
}

/// Teacher-driven student update: may change any mutable field, including
/// year and department. Password re-hashed only when non-empty.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudent {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
    pub year: i32,
    pub address: Option<String>,
    /// New password; empty or absent means "keep the current one"
    pub password: Option<String>,
    pub department_id: Option<i64>,
}

/// Self-service profile update: a student may change contact details and
/// password on their own row, never name, year or department.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentProfile {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// New password; empty or absent means "keep the current one"
    pub password: Option<String>,
}

/// Student projection returned to clients. Never carries password material.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub student_id: String,
    pub year: i32,
    pub address: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub courses: Vec<CourseRef>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.person.id,
            username: student.person.username,
            email: student.person.email,
            first_name: student.person.first_name,
            last_name: student.person.last_name,
            phone: student.person.phone,
            student_id: student.student_id,
            year: student.year,
            address: student.address,
            department_id: student.department_id,
            department_name: student.department_name,
            courses: student.courses,
        }
    }
}
