//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, course_handler, department_handler, student_handler, teacher_handler,
};
use crate::domain::{
    CourseRef, CourseResponse, CreateCourse, CreateDepartment, CreateStudent, CreateTeacher,
    DepartmentResponse, Role, StudentResponse, TeacherResponse, UpdateCourse, UpdateDepartment,
    UpdateStudent, UpdateStudentProfile, UpdateTeacher,
};
use crate::services::{LoginRequest, TokenResponse};

/// OpenAPI documentation for the Campus Records API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Records API",
        version = "0.1.0",
        description = "Role-based academic records service: departments, teachers, students, courses and enrollment"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // Department endpoints
        department_handler::list_departments,
        department_handler::get_department,
        department_handler::create_department,
        department_handler::update_department,
        department_handler::delete_department,
        // Teacher endpoints
        teacher_handler::list_teachers,
        teacher_handler::get_teacher,
        teacher_handler::create_teacher,
        teacher_handler::update_teacher,
        teacher_handler::delete_teacher,
        // Student endpoints
        student_handler::list_students,
        student_handler::get_student,
        student_handler::create_student,
        student_handler::update_student,
        student_handler::delete_student,
        student_handler::get_profile,
        student_handler::update_profile,
        student_handler::enroll,
        student_handler::unenroll,
        // Course endpoints
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::create_course,
        course_handler::update_course,
        course_handler::delete_course,
    ),
    components(
        schemas(
            Role,
            DepartmentResponse,
            CreateDepartment,
            UpdateDepartment,
            TeacherResponse,
            CreateTeacher,
            UpdateTeacher,
            StudentResponse,
            CreateStudent,
            UpdateStudent,
            UpdateStudentProfile,
            CourseRef,
            CourseResponse,
            CreateCourse,
            UpdateCourse,
            LoginRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Departments", description = "Department management (teacher role)"),
        (name = "Teachers", description = "Teacher account management (teacher role)"),
        (name = "Students", description = "Student accounts, profiles and enrollment"),
        (name = "Courses", description = "Course catalog and management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
