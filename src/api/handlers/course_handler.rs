//! Course handlers. Reads are public; mutations are teacher-only.

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
use crate::domain::{CourseResponse, CreateCourse, UpdateCourse};
use crate::errors::AppResult;

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// Course list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCoursesQuery {
    /// Restrict to one department
    pub department_id: Option<i64>,
    /// Restrict to one teacher
    pub teacher_id: Option<i64>,
}

/// List courses, optionally filtered by department or teacher
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    params(ListCoursesQuery),
    responses(
        (status = 200, description = "Courses listed", body = [CourseResponse])
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListCoursesQuery>,
) -> AppResult<Json<Vec<CourseResponse>>> {
    authorize(role_of(user.as_deref()), Resource::Course, Action::View)?;

    let courses = match (query.department_id, query.teacher_id) {
        (Some(department_id), _) => {
            state
                .course_service
                .list_courses_by_department(department_id)
                .await?
        }
        (None, Some(teacher_id)) => {
            state.course_service.list_courses_by_teacher(teacher_id).await?
        }
        (None, None) => state.course_service.list_courses().await?,
    };
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "Courses",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<Json<CourseResponse>> {
    authorize(role_of(user.as_deref()), Resource::Course, Action::View)?;

    let course = state.course_service.get_course(id).await?;
    Ok(Json(CourseResponse::from(course)))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/courses",
    tag = "Courses",
    request_body = CreateCourse,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 404, description = "Referenced department or teacher not found"),
        (status = 409, description = "Course code already exists")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    ValidatedJson(payload): ValidatedJson<CreateCourse>,
) -> AppResult<(StatusCode, Json<CourseResponse>)> {
    authorize(role_of(user.as_deref()), Resource::Course, Action::Create)?;

    let course = state.course_service.create_course(payload).await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "Courses",
    params(("id" = i64, Path, description = "Course id")),
    request_body = UpdateCourse,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course or referenced entity not found"),
        (status = 409, description = "Course code already exists")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateCourse>,
) -> AppResult<Json<CourseResponse>> {
    authorize(role_of(user.as_deref()), Resource::Course, Action::Update)?;

    let course = state.course_service.update_course(id, payload).await?;
    Ok(Json(CourseResponse::from(course)))
}

/// Delete a course and its enrollment rows
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "Courses",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    authorize(role_of(user.as_deref()), Resource::Course, Action::Delete)?;

    state.course_service.delete_course(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
