use axum::{
    Router,
    extract::State,
    routing::{get, put},
};
use uuid::Uuid;

use super::dto::{DepartmentRequest, DepartmentResponse, DepartmentSummaryResponse};
use crate::extractor::{AdminClaims, AppJson, AppPath};
use crate::repositories::DepartmentRepository;
use crate::response::{ApiResult, ApiSuccess, DeletedResponse, created, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/admin/departments",
            get(get_all_departments).post(create_department),
        )
        .route(
            "/api/v1/admin/departments/{department_id}",
            put(update_department).delete(delete_department),
        )
}

/// Get all departments with course and teacher counts (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/departments",
    responses(
        (status = 200, description = "Departments retrieved", body = ApiSuccess<Vec<DepartmentSummaryResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
pub async fn get_all_departments(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
) -> ApiResult<Vec<DepartmentSummaryResponse>> {
    let departments = DepartmentRepository::new(&state.db)
        .find_all_with_counts()
        .await?;

    ok(departments.into_iter().map(Into::into).collect())
}

/// Create a new department (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/admin/departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = ApiSuccess<DepartmentResponse>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Department code already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
pub async fn create_department(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DepartmentRequest>,
) -> ApiResult<DepartmentResponse> {
    let input = payload.validate()?;
    let department = DepartmentRepository::new(&state.db).create(input).await?;

    created(department.into())
}

/// Update department (Admin only)
#[utoipa::path(
    put,
    path = "/api/v1/admin/departments/{department_id}",
    params(
        ("department_id" = Uuid, Path, description = "Department ID")
    ),
    request_body = DepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = ApiSuccess<DepartmentResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department code already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
pub async fn update_department(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(department_id): AppPath<Uuid>,
    AppJson(payload): AppJson<DepartmentRequest>,
) -> ApiResult<DepartmentResponse> {
    let input = payload.validate()?;
    let department = DepartmentRepository::new(&state.db)
        .update(department_id, input)
        .await?;

    ok(department.into())
}

/// Delete department (Admin only)
///
/// Refused while courses, subjects or teachers still reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/departments/{department_id}",
    params(
        ("department_id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department deleted", body = ApiSuccess<DeletedResponse>),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department still in use"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
pub async fn delete_department(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(department_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    DepartmentRepository::new(&state.db)
        .delete(department_id)
        .await?;

    ok(DeletedResponse { id: department_id })
}
