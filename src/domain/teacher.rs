//! Teacher domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::person::{Account, Person};

/// Teacher domain entity: shared person fields plus teacher-specific ones.
#[derive(Debug, Clone)]
pub struct Teacher {
    pub person: Person,
    pub employee_id: String,
    pub specialization: Option<String>,
    pub department_id: Option<i64>,
    /// Resolved department name for display, if a department is set
    pub department_name: Option<String>,
}

impl Account for Teacher {
    fn identity(&self) -> &Person {
        &self.person
    }
}

/// Teacher creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeacher {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jsmith")]
    pub username: String,
    /// Plain-text password, hashed before storage (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jsmith@school.edu")]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Employee ID is required"))]
    #[schema(example = "EMP042")]
    pub employee_id: String,
    pub specialization: Option<String>,
    /// Optional department reference; must resolve if supplied
    pub department_id: Option<i64>,
}

/// Teacher update data transfer object.
///
/// Email, names, phone and specialization are overwritten unconditionally.
/// The password is re-hashed only when a non-empty value is supplied, and
/// the department is re-resolved only when an id is supplied.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacher {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    /// New password; empty or absent means "keep the current one"
    pub password: Option<String>,
    pub department_id: Option<i64>,
}

/// Teacher projection returned to clients. Never carries password material.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub employee_id: String,
    pub specialization: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
}

impl From<Teacher> for TeacherResponse {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.person.id,
            username: teacher.person.username,
            email: teacher.person.email,
            first_name: teacher.person.first_name,
            last_name: teacher.person.last_name,
            phone: teacher.person.phone,
            employee_id: teacher.employee_id,
            specialization: teacher.specialization,
            department_id: teacher.department_id,
            department_name: teacher.department_name,
        }
    }
}
