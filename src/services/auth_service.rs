//! Authentication service - Issues and verifies JWT tokens.
//!
//! Login looks the account up first among teachers, then among students;
//! both satisfy the domain `Account` capability, so the rest of the flow
//! does not care which table the row came from.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::password::DUMMY_HASH;
use crate::domain::{Account, Hasher, Person};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Login request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "admin")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "admin123")]
    pub password: String,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return JWT token
    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for an authenticated person (shared helper)
fn generate_token(person: &Person, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: person.id,
        username: person.username.clone(),
        role: person.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn Hasher>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn Hasher>, config: Config) -> Self {
        Self { uow, hasher, config }
    }

    async fn find_account(&self, username: &str) -> AppResult<Option<Person>> {
        if let Some(teacher) = self.uow.teachers().find_by_username(username).await? {
            return Ok(Some(teacher.identity().clone()));
        }
        let student = self.uow.students().find_by_username(username).await?;
        Ok(student.map(|s| s.identity().clone()))
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        let account = self.find_account(&request.username).await?;

        // SECURITY: verify against a dummy hash when the username is
        // unknown so response timing does not enumerate accounts.
        let stored_hash = account
            .as_ref()
            .map(|p| p.password_hash.as_str())
            .unwrap_or(DUMMY_HASH);
        let password_valid = self.hasher.verify(&request.password, stored_hash);

        let person = match account {
            Some(person) if password_valid => person,
            _ => {
                tracing::warn!(username = %request.username, "Failed login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !person.enabled {
            tracing::warn!(username = %person.username, "Login on disabled account");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(username = %person.username, role = %person.role, "Login succeeded");
        generate_token(&person, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Argon2Hasher, Role, Student, Teacher};
    use crate::infra::repositories::{MockStudentRepository, MockTeacherRepository};
    use crate::services::test_support::StubUow;

    fn person(username: &str, password: &str, role: Role, enabled: bool) -> Person {
        Person {
            id: 1,
            username: username.to_string(),
            password_hash: Argon2Hasher.hash(password).unwrap(),
            email: format!("{username}@school.edu"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: None,
            role,
            enabled,
        }
    }

    fn teacher_row(person: Person) -> Teacher {
        Teacher {
            person,
            employee_id: "EMP001".to_string(),
            specialization: None,
            department_id: None,
            department_name: None,
        }
    }

    fn student_row(person: Person) -> Student {
        Student {
            person,
            student_id: "S0001".to_string(),
            year: 1,
            address: None,
            department_id: None,
            department_name: None,
            courses: Vec::new(),
        }
    }

    fn authenticator(
        teachers: MockTeacherRepository,
        students: MockStudentRepository,
    ) -> Authenticator<StubUow> {
        let uow = StubUow::new().with_teachers(teachers).with_students(students);
        Authenticator::new(Arc::new(uow), Arc::new(Argon2Hasher), Config::for_tests())
    }

    #[tokio::test]
    async fn login_issues_verifiable_token_for_teacher() {
        let mut teachers = MockTeacherRepository::new();
        teachers.expect_find_by_username().returning(|_| {
            Ok(Some(teacher_row(person(
                "admin",
                "admin123",
                Role::Teacher,
                true,
            ))))
        });
        let students = MockStudentRepository::new();

        let auth = authenticator(teachers, students);
        let token = auth
            .login(LoginRequest {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "TEACHER");
    }

    #[tokio::test]
    async fn login_falls_back_to_students() {
        let mut teachers = MockTeacherRepository::new();
        teachers.expect_find_by_username().returning(|_| Ok(None));
        let mut students = MockStudentRepository::new();
        students.expect_find_by_username().returning(|_| {
            Ok(Some(student_row(person(
                "mjones",
                "SecurePass1",
                Role::Student,
                true,
            ))))
        });

        let auth = authenticator(teachers, students);
        let token = auth
            .login(LoginRequest {
                username: "mjones".to_string(),
                password: "SecurePass1".to_string(),
            })
            .await
            .unwrap();

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.role, "STUDENT");
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let mut teachers = MockTeacherRepository::new();
        teachers.expect_find_by_username().returning(|_| {
            Ok(Some(teacher_row(person(
                "admin",
                "admin123",
                Role::Teacher,
                true,
            ))))
        });
        let students = MockStudentRepository::new();

        let auth = authenticator(teachers, students);
        let err = auth
            .login(LoginRequest {
                username: "admin".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_username_is_invalid_credentials() {
        let mut teachers = MockTeacherRepository::new();
        teachers.expect_find_by_username().returning(|_| Ok(None));
        let mut students = MockStudentRepository::new();
        students.expect_find_by_username().returning(|_| Ok(None));

        let auth = authenticator(teachers, students);
        let err = auth
            .login(LoginRequest {
                username: "nobody".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn disabled_account_cannot_login() {
        let mut teachers = MockTeacherRepository::new();
        teachers.expect_find_by_username().returning(|_| {
            Ok(Some(teacher_row(person(
                "locked",
                "admin123",
                Role::Teacher,
                false,
            ))))
        });
        let students = MockStudentRepository::new();

        let auth = authenticator(teachers, students);
        let err = auth
            .login(LoginRequest {
                username: "locked".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn garbage_token_fails_verification() {
        let teachers = MockTeacherRepository::new();
        let students = MockStudentRepository::new();
        let auth = authenticator(teachers, students);

        assert!(auth.verify_token("not-a-jwt").is_err());
    }
}
