//! Shared integration-test harness: real services over an in-memory SQLite
//! database with the production migrations applied.

// Each test binary compiles this module; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use campus_records::config::Config;
use campus_records::domain::{
    Course, CreateCourse, CreateDepartment, CreateStudent, CreateTeacher, Department, Student,
    Teacher,
};
use campus_records::infra::db::Migrator;
use campus_records::services::{
    AuthService, CourseService, DepartmentService, ServiceContainer, Services, StudentService,
    TeacherService,
};

pub struct TestApp {
    pub conn: DatabaseConnection,
    pub auth: Arc<dyn AuthService>,
    pub departments: Arc<dyn DepartmentService>,
    pub teachers: Arc<dyn TeacherService>,
    pub students: Arc<dyn StudentService>,
    pub courses: Arc<dyn CourseService>,
}

/// Fresh database per test. A single pooled connection keeps the in-memory
/// database alive for the test's lifetime.
pub async fn spawn() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(600));

    let conn = sea_orm::Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&conn, None).await.expect("run migrations");

    let services = Services::from_connection(conn.clone(), Config::for_tests());

    TestApp {
        conn,
        auth: services.auth(),
        departments: services.departments(),
        teachers: services.teachers(),
        students: services.students(),
        courses: services.courses(),
    }
}

pub async fn create_department(app: &TestApp, name: &str) -> Department {
    app.departments
        .create_department(CreateDepartment {
            name: name.to_string(),
            description: Some(format!("Department of {name}")),
        })
        .await
        .expect("create department")
}

pub async fn create_teacher(
    app: &TestApp,
    username: &str,
    employee_id: &str,
    department_id: Option<i64>,
) -> Teacher {
    app.teachers
        .create_teacher(CreateTeacher {
            username: username.to_string(),
            password: "TeachersRule1!".to_string(),
            email: format!("{username}@school.edu"),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone: None,
            employee_id: employee_id.to_string(),
            specialization: Some("Compilers".to_string()),
            department_id,
        })
        .await
        .expect("create teacher")
}

pub async fn create_student(
    app: &TestApp,
    username: &str,
    student_id: &str,
    department_id: Option<i64>,
) -> Student {
    app.students
        .create_student(CreateStudent {
            username: username.to_string(),
            password: "StudentsRule1!".to_string(),
            email: format!("{username}@school.edu"),
            first_name: "Mary".to_string(),
            last_name: "Jones".to_string(),
            phone: None,
            student_id: student_id.to_string(),
            year: 2,
            address: Some("12 Campus Way".to_string()),
            department_id,
        })
        .await
        .expect("create student")
}

pub async fn create_course(
    app: &TestApp,
    code: &str,
    department_id: Option<i64>,
    teacher_id: Option<i64>,
) -> Course {
    app.courses
        .create_course(CreateCourse {
            name: format!("Course {code}"),
            code: code.to_string(),
            description: None,
            credits: 5,
            department_id,
            teacher_id,
        })
        .await
        .expect("create course")
}
