use axum::{
    Router,
    extract::State,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{
    BatchCreatedResponse, BatchDetailsResponse, BatchRequest, BatchResponse, BatchSummaryResponse,
    SectionOptionResponse, SectionRequest, SectionResponse,
};
use crate::extractor::{AdminClaims, AppJson, AppPath};
use crate::repositories::{BatchRepository, SectionRepository};
use crate::response::{ApiResult, ApiSuccess, DeletedResponse, created, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/admin/batches",
            get(get_all_batches).post(create_batch),
        )
        .route(
            "/api/v1/admin/batches/{batch_id}",
            get(get_batch).put(update_batch).delete(delete_batch),
        )
        .route("/api/v1/admin/sections", get(get_all_sections))
        .route(
            "/api/v1/admin/semesters/{semester_id}/sections",
            post(create_section),
        )
        .route("/api/v1/admin/sections/{section_id}", delete(delete_section))
}

/// Get all batches, newest first (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/batches",
    responses(
        (status = 200, description = "Batches retrieved", body = ApiSuccess<Vec<BatchSummaryResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn get_all_batches(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
) -> ApiResult<Vec<BatchSummaryResponse>> {
    let batches = BatchRepository::new(&state.db)
        .find_all_with_details()
        .await?;

    ok(batches.into_iter().map(Into::into).collect())
}

/// Create a batch and generate its semesters (Admin only)
///
/// A batch spanning `n` years gets `2n` semesters numbered from 1. The batch
/// and its semesters are written in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/admin/batches",
    request_body = BatchRequest,
    responses(
        (status = 201, description = "Batch created", body = ApiSuccess<BatchCreatedResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Batch already exists for this course"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn create_batch(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BatchRequest>,
) -> ApiResult<BatchCreatedResponse> {
    let input = payload.validate()?;
    let (batch, semesters) = BatchRepository::new(&state.db).create(input).await?;

    created(BatchCreatedResponse {
        batch: batch.into(),
        semesters: semesters.into_iter().map(Into::into).collect(),
    })
}

/// Get batch with semesters and sections (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/batches/{batch_id}",
    params(
        ("batch_id" = Uuid, Path, description = "Batch ID")
    ),
    responses(
        (status = 200, description = "Batch retrieved", body = ApiSuccess<BatchDetailsResponse>),
        (status = 404, description = "Batch not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn get_batch(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(batch_id): AppPath<Uuid>,
) -> ApiResult<BatchDetailsResponse> {
    let details = BatchRepository::new(&state.db).find_details(batch_id).await?;

    ok(details.into())
}

/// Update batch and reconcile its semesters (Admin only)
#[utoipa::path(
    put,
    path = "/api/v1/admin/batches/{batch_id}",
    params(
        ("batch_id" = Uuid, Path, description = "Batch ID")
    ),
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Batch updated", body = ApiSuccess<BatchResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Batch or course not found"),
        (status = 409, description = "Duplicate batch, or dropped semesters still have sections"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn update_batch(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(batch_id): AppPath<Uuid>,
    AppJson(payload): AppJson<BatchRequest>,
) -> ApiResult<BatchResponse> {
    let input = payload.validate()?;
    let batch = BatchRepository::new(&state.db)
        .update(batch_id, input)
        .await?;

    ok(batch.into())
}

/// Delete batch with its semesters and sections (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/batches/{batch_id}",
    params(
        ("batch_id" = Uuid, Path, description = "Batch ID")
    ),
    responses(
        (status = 200, description = "Batch deleted", body = ApiSuccess<DeletedResponse>),
        (status = 404, description = "Batch not found"),
        (status = 409, description = "Batch still has students or subject assignments"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
pub async fn delete_batch(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(batch_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    BatchRepository::new(&state.db).delete(batch_id).await?;

    ok(DeletedResponse { id: batch_id })
}

/// Get all sections with semester, batch and course (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/sections",
    responses(
        (status = 200, description = "Sections retrieved", body = ApiSuccess<Vec<SectionOptionResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
pub async fn get_all_sections(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
) -> ApiResult<Vec<SectionOptionResponse>> {
    let sections = SectionRepository::new(&state.db).find_all_options().await?;

    ok(sections.into_iter().map(Into::into).collect())
}

/// Add a section to a semester (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/admin/semesters/{semester_id}/sections",
    params(
        ("semester_id" = Uuid, Path, description = "Semester ID")
    ),
    request_body = SectionRequest,
    responses(
        (status = 201, description = "Section created", body = ApiSuccess<SectionResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Semester not found"),
        (status = 409, description = "Section already exists in this semester"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
pub async fn create_section(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(semester_id): AppPath<Uuid>,
    AppJson(payload): AppJson<SectionRequest>,
) -> ApiResult<SectionResponse> {
    let name = payload.validate()?;
    let section = SectionRepository::new(&state.db)
        .create(semester_id, name)
        .await?;

    created(section.into())
}

/// Delete section (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/sections/{section_id}",
    params(
        ("section_id" = Uuid, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Section deleted", body = ApiSuccess<DeletedResponse>),
        (status = 404, description = "Section not found"),
        (status = 409, description = "Section still has students or subject assignments"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
pub async fn delete_section(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(section_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    SectionRepository::new(&state.db).delete(section_id).await?;

    ok(DeletedResponse { id: section_id })
}
