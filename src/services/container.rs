//! Service Container - Centralized service access.
//!
//! Provides one place to construct and hand out the application services,
//! thread-safe via Arc, depending on the service traits rather than the
//! concrete managers.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CourseManager, CourseService, DepartmentManager,
    DepartmentService, StudentManager, StudentService, TeacherManager, TeacherService,
};
use crate::config::Config;
use crate::domain::Argon2Hasher;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get department service
    fn departments(&self) -> Arc<dyn DepartmentService>;

    /// Get teacher service
    fn teachers(&self) -> Arc<dyn TeacherService>;

    /// Get student service
    fn students(&self) -> Arc<dyn StudentService>;

    /// Get course service
    fn courses(&self) -> Arc<dyn CourseService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    department_service: Arc<dyn DepartmentService>,
    teacher_service: Arc<dyn TeacherService>,
    student_service: Arc<dyn StudentService>,
    course_service: Arc<dyn CourseService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        department_service: Arc<dyn DepartmentService>,
        teacher_service: Arc<dyn TeacherService>,
        student_service: Arc<dyn StudentService>,
        course_service: Arc<dyn CourseService>,
    ) -> Self {
        Self {
            auth_service,
            department_service,
            teacher_service,
            student_service,
            course_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let hasher = Arc::new(Argon2Hasher);

        let auth_service = Arc::new(Authenticator::new(uow.clone(), hasher.clone(), config));
        let department_service = Arc::new(DepartmentManager::new(uow.clone()));
        let teacher_service = Arc::new(TeacherManager::new(uow.clone(), hasher.clone()));
        let student_service = Arc::new(StudentManager::new(uow.clone(), hasher.clone()));
        let course_service = Arc::new(CourseManager::new(uow));

        Self {
            auth_service,
            department_service,
            teacher_service,
            student_service,
            course_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentService> {
        self.department_service.clone()
    }

    fn teachers(&self) -> Arc<dyn TeacherService> {
        self.teacher_service.clone()
    }

    fn students(&self) -> Arc<dyn StudentService> {
        self.student_service.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }
}
