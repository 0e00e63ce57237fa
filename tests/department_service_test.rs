//! Department service integration tests against in-memory SQLite.

mod common;

use campus_records::domain::{CreateDepartment, UpdateDepartment};
use campus_records::errors::AppError;

use common::{create_course, create_department, create_student, create_teacher, spawn};

#[tokio::test]
async fn create_and_get_department() {
    let app = spawn().await;

    let created = create_department(&app, "Mathematics").await;
    let fetched = app.departments.get_department(created.id).await.unwrap();

    assert_eq!(fetched.name, "Mathematics");
    assert_eq!(
        fetched.description.as_deref(),
        Some("Department of Mathematics")
    );
}

#[tokio::test]
async fn duplicate_name_is_conflict_and_leaves_no_row() {
    let app = spawn().await;
    create_department(&app, "Mathematics").await;

    let err = app
        .departments
        .create_department(CreateDepartment {
            name: "Mathematics".to_string(),
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    let all = app.departments.list_departments().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn update_overwrites_name_and_description() {
    let app = spawn().await;
    let dept = create_department(&app, "Maths").await;

    let updated = app
        .departments
        .update_department(
            dept.id,
            UpdateDepartment {
                name: "Mathematics".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Mathematics");
    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn update_missing_department_is_not_found() {
    let app = spawn().await;

    let err = app
        .departments
        .update_department(
            9999,
            UpdateDepartment {
                name: "Ghost".to_string(),
                description: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn rename_into_existing_name_is_conflict() {
    let app = spawn().await;
    create_department(&app, "Mathematics").await;
    let physics = create_department(&app, "Physics").await;

    let err = app
        .departments
        .update_department(
            physics.id,
            UpdateDepartment {
                name: "Mathematics".to_string(),
                description: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn delete_missing_department_is_not_found() {
    let app = spawn().await;

    let err = app.departments.delete_department(123).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_cascades_to_teachers_students_courses_and_enrollments() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let other = create_department(&app, "Physics").await;

    let teacher = create_teacher(&app, "t1", "E1", Some(dept.id)).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;
    let course = create_course(&app, "M101", Some(dept.id), Some(teacher.person.id)).await;
    app.students
        .enroll(student.person.id, course.id)
        .await
        .unwrap();

    // Unrelated rows in the other department must survive
    let other_teacher = create_teacher(&app, "t2", "E2", Some(other.id)).await;
    let other_course = create_course(&app, "P101", Some(other.id), Some(other_teacher.person.id)).await;

    app.departments.delete_department(dept.id).await.unwrap();

    assert!(matches!(
        app.departments.get_department(dept.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        app.teachers.get_teacher(teacher.person.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        app.students.get_student(student.person.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        app.courses.get_course(course.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));

    // Survivors
    assert!(app.teachers.get_teacher(other_teacher.person.id).await.is_ok());
    assert!(app.courses.get_course(other_course.id).await.is_ok());
    assert_eq!(app.departments.list_departments().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_also_removes_courses_taught_by_its_teachers_elsewhere() {
    let app = spawn().await;
    let maths = create_department(&app, "Mathematics").await;
    let physics = create_department(&app, "Physics").await;

    // Teacher belongs to maths but teaches a physics-homed course
    let teacher = create_teacher(&app, "t1", "E1", Some(maths.id)).await;
    let cross_course = create_course(&app, "P201", Some(physics.id), Some(teacher.person.id)).await;

    app.departments.delete_department(maths.id).await.unwrap();

    assert!(matches!(
        app.courses.get_course(cross_course.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(app.departments.get_department(physics.id).await.is_ok());
}
