//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AuthService, CourseService, DepartmentService, ServiceContainer, Services, StudentService,
    TeacherService,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer and UnitOfWork support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Department service
    pub department_service: Arc<dyn DepartmentService>,
    /// Teacher service
    pub teacher_service: Arc<dyn TeacherService>,
    /// Student service
    pub student_service: Arc<dyn StudentService>,
    /// Course service
    pub course_service: Arc<dyn CourseService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            department_service: container.departments(),
            teacher_service: container.teachers(),
            student_service: container.students(),
            course_service: container.courses(),
            database,
        }
    }
}
