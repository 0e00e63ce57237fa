//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
pub mod container;
mod course_service;
mod department_service;
mod student_service;
mod teacher_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, LoginRequest, TokenResponse};
pub use course_service::{CourseManager, CourseService};
pub use department_service::{DepartmentManager, DepartmentService};
pub use student_service::{StudentManager, StudentService};
pub use teacher_service::{TeacherManager, TeacherService};

#[cfg(test)]
pub use container::MockServiceContainer;
