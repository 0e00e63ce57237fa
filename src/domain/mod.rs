//! Domain layer - Core business entities and logic
//!
//! Contains the domain models, request/response shapes, the role/policy
//! rule table and the password-hashing capability, independent of
//! infrastructure concerns.

pub mod course;
pub mod department;
pub mod password;
pub mod person;
pub mod policy;
pub mod student;
pub mod teacher;

pub use course::{Course, CourseRef, CourseResponse, CreateCourse, UpdateCourse};
pub use department::{CreateDepartment, Department, DepartmentResponse, UpdateDepartment};
pub use password::{Argon2Hasher, Hasher};
pub use person::{Account, Credentials, Person, Role};
pub use student::{
    CreateStudent, Student, StudentResponse, UpdateStudent, UpdateStudentProfile,
};
pub use teacher::{CreateTeacher, Teacher, TeacherResponse, UpdateTeacher};
