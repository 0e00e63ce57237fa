//! Course service integration tests: code uniqueness and name resolution.

mod common;

use campus_records::domain::{CreateCourse, UpdateCourse};
use campus_records::errors::AppError;

use common::{create_course, create_department, create_teacher, spawn};

#[tokio::test]
async fn create_resolves_department_and_teacher_names() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let teacher = create_teacher(&app, "t1", "E1", Some(dept.id)).await;

    let course = create_course(&app, "M101", Some(dept.id), Some(teacher.person.id)).await;

    assert_eq!(course.department_name.as_deref(), Some("Mathematics"));
    assert_eq!(course.teacher_name.as_deref(), Some("Grace Hopper"));
}

#[tokio::test]
async fn duplicate_code_is_conflict() {
    let app = spawn().await;
    create_course(&app, "M101", None, None).await;

    let err = app
        .courses
        .create_course(CreateCourse {
            name: "Another".to_string(),
            code: "M101".to_string(),
            description: None,
            credits: 3,
            department_id: None,
            teacher_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn create_with_unknown_teacher_is_not_found() {
    let app = spawn().await;

    let err = app
        .courses
        .create_course(CreateCourse {
            name: "Orphan".to_string(),
            code: "X1".to_string(),
            description: None,
            credits: 3,
            department_id: None,
            teacher_id: Some(404),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_may_keep_its_own_code() {
    let app = spawn().await;
    let course = create_course(&app, "M101", None, None).await;

    let updated = app
        .courses
        .update_course(
            course.id,
            UpdateCourse {
                name: "Calculus I".to_string(),
                code: "M101".to_string(),
                description: Some("Limits and derivatives".to_string()),
                credits: 6,
                department_id: None,
                teacher_id: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Calculus I");
    assert_eq!(updated.credits, 6);
}

#[tokio::test]
async fn update_to_another_courses_code_is_conflict() {
    let app = spawn().await;
    create_course(&app, "M101", None, None).await;
    let other = create_course(&app, "M102", None, None).await;

    let err = app
        .courses
        .update_course(
            other.id,
            UpdateCourse {
                name: "Clash".to_string(),
                code: "M101".to_string(),
                description: None,
                credits: 5,
                department_id: None,
                teacher_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn list_by_teacher_filters() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let t1 = create_teacher(&app, "t1", "E1", Some(dept.id)).await;
    let t2 = create_teacher(&app, "t2", "E2", Some(dept.id)).await;
    create_course(&app, "M101", Some(dept.id), Some(t1.person.id)).await;
    create_course(&app, "M102", Some(dept.id), Some(t1.person.id)).await;
    create_course(&app, "M103", Some(dept.id), Some(t2.person.id)).await;

    let taught = app
        .courses
        .list_courses_by_teacher(t1.person.id)
        .await
        .unwrap();
    assert_eq!(taught.len(), 2);
    assert!(taught.iter().all(|c| c.teacher_id == Some(t1.person.id)));
}
