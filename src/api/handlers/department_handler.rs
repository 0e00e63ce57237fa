//! Department handlers. Every route is restricted to teachers by the
//! policy table.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{role_of, CurrentUser};
use crate::api::AppState;
use crate::domain::policy::{authorize, Action, Resource};
use crate::domain::{CreateDepartment, DepartmentResponse, UpdateDepartment};
use crate::errors::AppResult;

/// Create department routes
pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:id",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
}

/// List all departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "Departments",
    responses(
        (status = 200, description = "Departments listed", body = [DepartmentResponse]),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Not a teacher")
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> AppResult<Json<Vec<DepartmentResponse>>> {
    authorize(role_of(user.as_deref()), Resource::Department, Action::View)?;

    let departments = state.department_service.list_departments().await?;
    Ok(Json(
        departments.into_iter().map(DepartmentResponse::from).collect(),
    ))
}

/// Get a department by id
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "Departments",
    params(("id" = i64, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department found", body = DepartmentResponse),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<Json<DepartmentResponse>> {
    authorize(role_of(user.as_deref()), Resource::Department, Action::View)?;

    let department = state.department_service.get_department(id).await?;
    Ok(Json(DepartmentResponse::from(department)))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "Departments",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 409, description = "Department name already exists")
    )
)]
pub async fn create_department(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    ValidatedJson(payload): ValidatedJson<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DepartmentResponse>)> {
    authorize(role_of(user.as_deref()), Resource::Department, Action::Create)?;

    let department = state.department_service.create_department(payload).await?;
    Ok((StatusCode::CREATED, Json(DepartmentResponse::from(department))))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "Departments",
    params(("id" = i64, Path, description = "Department id")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = DepartmentResponse),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department name already exists")
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartment>,
) -> AppResult<Json<DepartmentResponse>> {
    authorize(role_of(user.as_deref()), Resource::Department, Action::Update)?;

    let department = state
        .department_service
        .update_department(id, payload)
        .await?;
    Ok(Json(DepartmentResponse::from(department)))
}

/// Delete a department and everything it owns
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "Departments",
    params(("id" = i64, Path, description = "Department id")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    authorize(role_of(user.as_deref()), Resource::Department, Action::Delete)?;

    state.department_service.delete_department(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
