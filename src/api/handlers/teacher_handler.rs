//! Teacher handlers. Every route is restricted to teachers by the
//! policy table.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{role_of, CurrentUser};
use crate::api::AppState;
use crate::domain::policy::{authorize, Action, Resource};
use crate::domain::{CreateTeacher, TeacherResponse, UpdateTeacher};
use crate::errors::AppResult;

/// Create teacher routes
pub fn teacher_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers).post(create_teacher))
        .route(
            "/:id",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}

/// Teacher list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTeachersQuery {
    /// Restrict to one department
    pub department_id: Option<i64>,
}

/// List teachers, optionally filtered by department
#[utoipa::path(
    get,
    path = "/teachers",
    tag = "Teachers",
    params(ListTeachersQuery),
    responses(
        (status = 200, description = "Teachers listed", body = [TeacherResponse]),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Not a teacher")
    )
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListTeachersQuery>,
) -> AppResult<Json<Vec<TeacherResponse>>> {
    authorize(role_of(user.as_deref()), Resource::Teacher, Action::View)?;

    let teachers = match query.department_id {
        Some(department_id) => {
            state
                .teacher_service
                .list_teachers_by_department(department_id)
                .await?
        }
        None => state.teacher_service.list_teachers().await?,
    };
    Ok(Json(teachers.into_iter().map(TeacherResponse::from).collect()))
}

/// Get a teacher by id
#[utoipa::path(
    get,
    path = "/teachers/{id}",
    tag = "Teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher found", body = TeacherResponse),
        (status = 404, description = "Teacher not found")
    )
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<Json<TeacherResponse>> {
    authorize(role_of(user.as_deref()), Resource::Teacher, Action::View)?;

    let teacher = state.teacher_service.get_teacher(id).await?;
    Ok(Json(TeacherResponse::from(teacher)))
}

/// Create a teacher account
#[utoipa::path(
    post,
    path = "/teachers",
    tag = "Teachers",
    request_body = CreateTeacher,
    responses(
        (status = 201, description = "Teacher created", body = TeacherResponse),
        (status = 404, description = "Referenced department not found"),
        (status = 409, description = "Username, email or employee id taken")
    )
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    ValidatedJson(payload): ValidatedJson<CreateTeacher>,
) -> AppResult<(StatusCode, Json<TeacherResponse>)> {
    authorize(role_of(user.as_deref()), Resource::Teacher, Action::Create)?;

    let teacher = state.teacher_service.create_teacher(payload).await?;
    Ok((StatusCode::CREATED, Json(TeacherResponse::from(teacher))))
}

/// Update a teacher
#[utoipa::path(
    put,
    path = "/teachers/{id}",
    tag = "Teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    request_body = UpdateTeacher,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherResponse),
        (status = 404, description = "Teacher or referenced department not found"),
        (status = 409, description = "Email taken")
    )
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateTeacher>,
) -> AppResult<Json<TeacherResponse>> {
    authorize(role_of(user.as_deref()), Resource::Teacher, Action::Update)?;

    let teacher = state.teacher_service.update_teacher(id, payload).await?;
    Ok(Json(TeacherResponse::from(teacher)))
}

/// Delete a teacher and the courses they teach
#[utoipa::path(
    delete,
    path = "/teachers/{id}",
    tag = "Teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    responses(
        (status = 204, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found")
    )
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    authorize(role_of(user.as_deref()), Resource::Teacher, Action::Delete)?;

    state.teacher_service.delete_teacher(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
