//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod course_repository;
mod department_repository;
pub(crate) mod entities;
mod student_repository;
mod teacher_repository;

pub use course_repository::{CourseRepository, CourseStore};
pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use student_repository::{StudentRepository, StudentStore};
pub use teacher_repository::{TeacherRepository, TeacherStore};

// Export mocks for unit tests
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
#[cfg(test)]
pub use teacher_repository::MockTeacherRepository;
