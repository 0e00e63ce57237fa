//! Enrollment lifecycle tests: enroll, unenroll, and what deleting the
//! surrounding rows does to the membership.

mod common;

use campus_records::errors::AppError;

use common::{create_course, create_department, create_student, create_teacher, spawn};

#[tokio::test]
async fn enroll_adds_course_to_student_projection() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let teacher = create_teacher(&app, "t1", "E1", Some(dept.id)).await;
    let course = create_course(&app, "M101", Some(dept.id), Some(teacher.person.id)).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;

    let refreshed = app.students.enroll(student.person.id, course.id).await.unwrap();

    assert_eq!(refreshed.courses.len(), 1);
    assert_eq!(refreshed.courses[0].code, "M101");
    assert_eq!(refreshed.courses[0].id, course.id);
}

#[tokio::test]
async fn enroll_twice_is_idempotent() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let course = create_course(&app, "M101", Some(dept.id), None).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;

    app.students.enroll(student.person.id, course.id).await.unwrap();
    let refreshed = app.students.enroll(student.person.id, course.id).await.unwrap();

    assert_eq!(refreshed.courses.len(), 1);
}

#[tokio::test]
async fn unenroll_removes_membership_and_tolerates_non_members() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let course = create_course(&app, "M101", Some(dept.id), None).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;

    app.students.enroll(student.person.id, course.id).await.unwrap();
    let refreshed = app
        .students
        .unenroll(student.person.id, course.id)
        .await
        .unwrap();
    assert!(refreshed.courses.is_empty());

    // A second unenroll is a no-op, not an error
    let again = app
        .students
        .unenroll(student.person.id, course.id)
        .await
        .unwrap();
    assert!(again.courses.is_empty());
}

#[tokio::test]
async fn enroll_with_missing_course_or_student_is_not_found() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let course = create_course(&app, "M101", Some(dept.id), None).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;

    assert!(matches!(
        app.students.enroll(student.person.id, 999).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        app.students.enroll(999, course.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn deleting_course_clears_it_from_student() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let course = create_course(&app, "M101", Some(dept.id), None).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;
    app.students.enroll(student.person.id, course.id).await.unwrap();

    app.courses.delete_course(course.id).await.unwrap();

    let refreshed = app.students.get_student(student.person.id).await.unwrap();
    assert!(refreshed.courses.is_empty());
}

#[tokio::test]
async fn deleting_student_leaves_course_intact() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let course = create_course(&app, "M101", Some(dept.id), None).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;
    app.students.enroll(student.person.id, course.id).await.unwrap();

    app.students.delete_student(student.person.id).await.unwrap();

    assert!(matches!(
        app.students.get_student(student.person.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(app.courses.get_course(course.id).await.is_ok());
}

#[tokio::test]
async fn deleting_teacher_removes_their_courses_and_enrollments() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let teacher = create_teacher(&app, "t1", "E1", Some(dept.id)).await;
    let course = create_course(&app, "M101", Some(dept.id), Some(teacher.person.id)).await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;
    app.students.enroll(student.person.id, course.id).await.unwrap();

    app.teachers.delete_teacher(teacher.person.id).await.unwrap();

    assert!(matches!(
        app.courses.get_course(course.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    let refreshed = app.students.get_student(student.person.id).await.unwrap();
    assert!(refreshed.courses.is_empty());
}
