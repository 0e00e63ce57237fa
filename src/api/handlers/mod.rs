//! HTTP request handlers.

pub mod auth_handler;
pub mod course_handler;
pub mod department_handler;
pub mod student_handler;
pub mod teacher_handler;

pub use auth_handler::auth_routes;
pub use course_handler::course_routes;
pub use department_handler::department_routes;
pub use student_handler::student_routes;
pub use teacher_handler::teacher_routes;
