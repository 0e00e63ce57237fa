//! Student handlers. Reads are public, mutations are teacher-only, and the
//! profile/enrollment routes act on the authenticated student's own row.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{role_of, CurrentUser};
use crate::api::AppState;
use crate::domain::policy::{authorize, Action, Resource};
use crate::domain::{CreateStudent, StudentResponse, UpdateStudent, UpdateStudentProfile};
use crate::errors::{AppError, AppResult};

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/enroll/:course_id", post(enroll))
        .route("/unenroll/:course_id", post(unenroll))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// Student list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListStudentsQuery {
    /// Restrict to one department
    pub department_id: Option<i64>,
}

fn require_user(user: Option<Extension<CurrentUser>>) -> AppResult<CurrentUser> {
    user.map(|Extension(u)| u).ok_or(AppError::Unauthorized)
}

/// List students, optionally filtered by department
#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    params(ListStudentsQuery),
    responses(
        (status = 200, description = "Students listed", body = [StudentResponse])
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListStudentsQuery>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    authorize(role_of(user.as_deref()), Resource::Student, Action::View)?;

    let students = match query.department_id {
        Some(department_id) => {
            state
                .student_service
                .list_students_by_department(department_id)
                .await?
        }
        None => state.student_service.list_students().await?,
    };
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Get a student by id
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "Students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<Json<StudentResponse>> {
    authorize(role_of(user.as_deref()), Resource::Student, Action::View)?;

    let student = state.student_service.get_student(id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Create a student account
#[utoipa::path(
    post,
    path = "/students",
    tag = "Students",
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 404, description = "Referenced department not found"),
        (status = 409, description = "Username, email or student id taken")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    ValidatedJson(payload): ValidatedJson<CreateStudent>,
) -> AppResult<(StatusCode, Json<StudentResponse>)> {
    authorize(role_of(user.as_deref()), Resource::Student, Action::Create)?;

    let student = state.student_service.create_student(payload).await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

/// Update a student (staff operation)
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "Students",
    params(("id" = i64, Path, description = "Student id")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student or referenced department not found"),
        (status = 409, description = "Email taken")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateStudent>,
) -> AppResult<Json<StudentResponse>> {
    authorize(role_of(user.as_deref()), Resource::Student, Action::Update)?;

    let student = state.student_service.update_student(id, payload).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Delete a student and their enrollment rows
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "Students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    authorize(role_of(user.as_deref()), Resource::Student, Action::Delete)?;

    state.student_service.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the authenticated student's own profile
#[utoipa::path(
    get,
    path = "/students/profile",
    tag = "Students",
    responses(
        (status = 200, description = "Own profile", body = StudentResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Caller is not a student")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> AppResult<Json<StudentResponse>> {
    authorize(
        role_of(user.as_deref()),
        Resource::Student,
        Action::EditOwnProfile,
    )?;
    let current = require_user(user)?;

    let student = state.student_service.get_student(current.id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Update the authenticated student's own profile
#[utoipa::path(
    put,
    path = "/students/profile",
    tag = "Students",
    request_body = UpdateStudentProfile,
    responses(
        (status = 200, description = "Profile updated", body = StudentResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Caller is not a student")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    ValidatedJson(payload): ValidatedJson<UpdateStudentProfile>,
) -> AppResult<Json<StudentResponse>> {
    authorize(
        role_of(user.as_deref()),
        Resource::Student,
        Action::EditOwnProfile,
    )?;
    let current = require_user(user)?;

    let student = state
        .student_service
        .update_own_profile(current.id, payload, &current.username)
        .await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Enroll the authenticated student in a course
#[utoipa::path(
    post,
    path = "/students/enroll/{course_id}",
    tag = "Students",
    params(("course_id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Enrolled (idempotent)", body = StudentResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(course_id): Path<i64>,
) -> AppResult<Json<StudentResponse>> {
    authorize(role_of(user.as_deref()), Resource::Course, Action::Enroll)?;
    let current = require_user(user)?;

    let student = state.student_service.enroll(current.id, course_id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Remove the authenticated student from a course
#[utoipa::path(
    post,
    path = "/students/unenroll/{course_id}",
    tag = "Students",
    params(("course_id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Unenrolled (idempotent)", body = StudentResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn unenroll(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(course_id): Path<i64>,
) -> AppResult<Json<StudentResponse>> {
    authorize(role_of(user.as_deref()), Resource::Course, Action::Unenroll)?;
    let current = require_user(user)?;

    let student = state.student_service.unenroll(current.id, course_id).await?;
    Ok(Json(StudentResponse::from(student)))
}
