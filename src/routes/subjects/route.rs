use axum::{
    Router,
    extract::State,
    routing::{get, put},
};
use uuid::Uuid;

use super::dto::{SubjectQuery, SubjectRequest, SubjectResponse};
use crate::extractor::{AdminClaims, AppJson, AppPath, AppQuery};
use crate::repositories::SubjectRepository;
use crate::response::{ApiResult, ApiSuccess, DeletedResponse, created, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/admin/subjects",
            get(get_all_subjects).post(create_subject),
        )
        .route(
            "/api/v1/admin/subjects/{subject_id}",
            put(update_subject).delete(delete_subject),
        )
}

/// Get subjects ordered by code (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/subjects",
    params(SubjectQuery),
    responses(
        (status = 200, description = "Subjects retrieved", body = ApiSuccess<Vec<SubjectResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn get_all_subjects(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SubjectQuery>,
) -> ApiResult<Vec<SubjectResponse>> {
    let subjects = SubjectRepository::new(&state.db)
        .find_all_with_department(query.department_id)
        .await?;

    ok(subjects.into_iter().map(Into::into).collect())
}

/// Create a new subject (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/admin/subjects",
    request_body = SubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = ApiSuccess<SubjectResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Subject code must be unique"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn create_subject(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubjectRequest>,
) -> ApiResult<SubjectResponse> {
    let input = payload.validate()?;
    let subject = SubjectRepository::new(&state.db).create(input).await?;

    created(subject.into())
}

/// Update subject (Admin only)
#[utoipa::path(
    put,
    path = "/api/v1/admin/subjects/{subject_id}",
    params(
        ("subject_id" = Uuid, Path, description = "Subject ID")
    ),
    request_body = SubjectRequest,
    responses(
        (status = 200, description = "Subject updated", body = ApiSuccess<SubjectResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Subject or department not found"),
        (status = 409, description = "Subject code must be unique"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn update_subject(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(subject_id): AppPath<Uuid>,
    AppJson(payload): AppJson<SubjectRequest>,
) -> ApiResult<SubjectResponse> {
    let input = payload.validate()?;
    let subject = SubjectRepository::new(&state.db)
        .update(subject_id, input)
        .await?;

    ok(subject.into())
}

/// Delete subject (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/subjects/{subject_id}",
    params(
        ("subject_id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject deleted", body = ApiSuccess<DeletedResponse>),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Subject is still assigned to sections"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn delete_subject(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(subject_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    SubjectRepository::new(&state.db).delete(subject_id).await?;

    ok(DeletedResponse { id: subject_id })
}
