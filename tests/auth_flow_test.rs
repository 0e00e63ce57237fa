//! Login flow against real Argon2 hashing and JWT issuance.

mod common;

use campus_records::config::TOKEN_TYPE_BEARER;
use campus_records::errors::AppError;
use campus_records::services::LoginRequest;

use common::{create_student, create_teacher, spawn};

#[tokio::test]
async fn teacher_login_issues_verifiable_token() {
    let app = spawn().await;
    let teacher = create_teacher(&app, "t1", "E1", None).await;

    let token = app
        .auth
        .login(LoginRequest {
            username: "t1".to_string(),
            password: "TeachersRule1!".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(token.token_type, TOKEN_TYPE_BEARER);
    let claims = app.auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, teacher.person.id);
    assert_eq!(claims.username, "t1");
    assert_eq!(claims.role, "TEACHER");
}

#[tokio::test]
async fn student_login_falls_back_to_students_table() {
    let app = spawn().await;
    create_student(&app, "s1", "S1", None).await;

    let token = app
        .auth
        .login(LoginRequest {
            username: "s1".to_string(),
            password: "StudentsRule1!".to_string(),
        })
        .await
        .unwrap();

    let claims = app.auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.role, "STUDENT");
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let app = spawn().await;
    create_teacher(&app, "t1", "E1", None).await;

    let err = app
        .auth
        .login(LoginRequest {
            username: "t1".to_string(),
            password: "not-the-password".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_username_is_invalid_credentials() {
    let app = spawn().await;

    let err = app
        .auth
        .login(LoginRequest {
            username: "nobody".to_string(),
            password: "whatever123".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = spawn().await;
    create_teacher(&app, "t1", "E1", None).await;

    let token = app
        .auth
        .login(LoginRequest {
            username: "t1".to_string(),
            password: "TeachersRule1!".to_string(),
        })
        .await
        .unwrap();

    let mut tampered = token.access_token;
    tampered.push('x');
    assert!(app.auth.verify_token(&tampered).is_err());
}
