//! Account uniqueness and self-service profile tests. Usernames and emails
//! are unique across both the teachers and students tables.

mod common;

use campus_records::domain::{
    CreateStudent, CreateTeacher, UpdateStudent, UpdateStudentProfile, UpdateTeacher,
};
use campus_records::errors::AppError;
use campus_records::services::LoginRequest;

use common::{create_department, create_student, create_teacher, spawn, TestApp};

fn student_input(username: &str, student_id: &str, email: &str) -> CreateStudent {
    CreateStudent {
        username: username.to_string(),
        password: "StudentsRule1!".to_string(),
        email: email.to_string(),
        first_name: "Mary".to_string(),
        last_name: "Jones".to_string(),
        phone: None,
        student_id: student_id.to_string(),
        year: 1,
        address: None,
        department_id: None,
    }
}

async fn try_create_student(app: &TestApp, input: CreateStudent) -> Result<(), AppError> {
    app.students.create_student(input).await.map(|_| ())
}

fn teacher_update(password: Option<String>, department_id: Option<i64>) -> UpdateTeacher {
    UpdateTeacher {
        email: "t1@school.edu".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        phone: None,
        specialization: Some("Compilers".to_string()),
        password,
        department_id,
    }
}

async fn login(app: &TestApp, username: &str, password: &str) -> Result<(), AppError> {
    app.auth
        .login(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
        .map(|_| ())
}

#[tokio::test]
async fn username_is_unique_across_teachers_and_students() {
    let app = spawn().await;
    create_teacher(&app, "sam", "E1", None).await;

    let err = try_create_student(&app, student_input("sam", "S1", "sam2@school.edu"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn email_is_unique_across_teachers_and_students() {
    let app = spawn().await;
    // create_teacher derives the email from the username
    create_teacher(&app, "sam", "E1", None).await;

    let err = try_create_student(&app, student_input("samantha", "S1", "sam@school.edu"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn student_id_is_unique_among_students() {
    let app = spawn().await;
    create_student(&app, "s1", "S1", None).await;

    let err = try_create_student(&app, student_input("s2", "S1", "s2@school.edu"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn employee_id_is_unique_among_teachers() {
    let app = spawn().await;
    create_teacher(&app, "t1", "E1", None).await;

    let err = app
        .teachers
        .create_teacher(CreateTeacher {
            username: "t2".to_string(),
            password: "TeachersRule1!".to_string(),
            email: "t2@school.edu".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone: None,
            employee_id: "E1".to_string(),
            specialization: None,
            department_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn create_with_unknown_department_is_not_found() {
    let app = spawn().await;

    let mut input = student_input("s1", "S1", "s1@school.edu");
    input.department_id = Some(777);
    let err = try_create_student(&app, input).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn failed_create_leaves_no_partial_row() {
    let app = spawn().await;

    let mut input = student_input("ghost", "S9", "ghost@school.edu");
    input.department_id = Some(777);
    try_create_student(&app, input).await.unwrap_err();

    let err = app
        .students
        .get_student_by_username("ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn staff_update_without_password_keeps_credentials() {
    let app = spawn().await;
    let teacher = create_teacher(&app, "t1", "E1", None).await;

    app.teachers
        .update_teacher(teacher.person.id, teacher_update(None, None))
        .await
        .unwrap();
    // An empty string means "keep the current one" as well
    app.teachers
        .update_teacher(teacher.person.id, teacher_update(Some(String::new()), None))
        .await
        .unwrap();

    assert!(login(&app, "t1", "TeachersRule1!").await.is_ok());
}

#[tokio::test]
async fn staff_update_with_new_password_rehashes() {
    let app = spawn().await;
    let teacher = create_teacher(&app, "t1", "E1", None).await;

    app.teachers
        .update_teacher(
            teacher.person.id,
            teacher_update(Some("FreshPassword1!".to_string()), None),
        )
        .await
        .unwrap();

    assert!(login(&app, "t1", "FreshPassword1!").await.is_ok());
    assert!(matches!(
        login(&app, "t1", "TeachersRule1!").await.unwrap_err(),
        AppError::InvalidCredentials
    ));
}

#[tokio::test]
async fn staff_update_resolves_new_department() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let student = create_student(&app, "s1", "S1", None).await;

    let updated = app
        .students
        .update_student(
            student.person.id,
            UpdateStudent {
                email: "s1@school.edu".to_string(),
                first_name: "Mary".to_string(),
                last_name: "Jones".to_string(),
                phone: None,
                year: 3,
                address: None,
                password: None,
                department_id: Some(dept.id),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.department_id, Some(dept.id));
    assert_eq!(updated.department_name.as_deref(), Some("Mathematics"));
    assert_eq!(updated.year, 3);
}

#[tokio::test]
async fn staff_update_with_unknown_department_is_not_found() {
    let app = spawn().await;
    let teacher = create_teacher(&app, "t1", "E1", None).await;

    let err = app
        .teachers
        .update_teacher(teacher.person.id, teacher_update(None, Some(777)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // The failed transaction leaves the row untouched
    let unchanged = app.teachers.get_teacher(teacher.person.id).await.unwrap();
    assert_eq!(unchanged.department_id, None);
}

#[tokio::test]
async fn own_profile_update_requires_matching_username() {
    let app = spawn().await;
    let student = create_student(&app, "s1", "S1", None).await;

    let err = app
        .students
        .update_own_profile(
            student.person.id,
            UpdateStudentProfile {
                email: "hijacked@school.edu".to_string(),
                phone: None,
                address: None,
                password: None,
            },
            "someone-else",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // The row must be untouched
    let unchanged = app.students.get_student(student.person.id).await.unwrap();
    assert_eq!(unchanged.person.email, "s1@school.edu");
}

#[tokio::test]
async fn own_profile_update_changes_contact_details_only() {
    let app = spawn().await;
    let dept = create_department(&app, "Mathematics").await;
    let student = create_student(&app, "s1", "S1", Some(dept.id)).await;

    let updated = app
        .students
        .update_own_profile(
            student.person.id,
            UpdateStudentProfile {
                email: "new@school.edu".to_string(),
                phone: Some("555-0100".to_string()),
                address: Some("1 New Street".to_string()),
                password: None,
            },
            "s1",
        )
        .await
        .unwrap();

    assert_eq!(updated.person.email, "new@school.edu");
    assert_eq!(updated.person.phone.as_deref(), Some("555-0100"));
    assert_eq!(updated.address.as_deref(), Some("1 New Street"));
    // Department and cohort year are outside the profile's reach
    assert_eq!(updated.department_id, Some(dept.id));
    assert_eq!(updated.year, student.year);
}
