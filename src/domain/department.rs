//! Department domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Department domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Department creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartment {
    /// Department name (unique)
    #[validate(length(min = 1, message = "Department name is required"))]
    #[schema(example = "Computer Science")]
    pub name: String,
    /// Free-text description
    #[schema(example = "Department of Computer Science and Engineering")]
    pub description: Option<String>,
}

/// Department update data transfer object.
///
/// Both fields are overwritten unconditionally.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
    pub description: Option<String>,
}

/// Department projection returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
            description: department.description,
        }
    }
}
