use axum::{
    Router,
    extract::State,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{CourseNodeResponse, MappingDetailsResponse, MappingRequest, MappingResponse};
use crate::extractor::{AdminClaims, AppJson, AppPath};
use crate::repositories::SubjectMappingRepository;
use crate::response::{ApiResult, ApiSuccess, DeletedResponse, created, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/hierarchy", get(get_hierarchy))
        .route(
            "/api/v1/admin/sections/{section_id}/mappings",
            get(get_section_mappings),
        )
        .route("/api/v1/admin/subject-mappings", post(create_mapping))
        .route(
            "/api/v1/admin/subject-mappings/{subject_mapping_id}",
            delete(delete_mapping),
        )
}

/// Course, batch, semester and section tree for pickers (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/hierarchy",
    responses(
        (status = 200, description = "Hierarchy retrieved", body = ApiSuccess<Vec<CourseNodeResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subject Mappings"
)]
pub async fn get_hierarchy(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
) -> ApiResult<Vec<CourseNodeResponse>> {
    let courses = SubjectMappingRepository::new(&state.db).hierarchy().await?;

    ok(courses.into_iter().map(Into::into).collect())
}

/// Subjects assigned to a section with their teachers (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/sections/{section_id}/mappings",
    params(
        ("section_id" = Uuid, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Assignments retrieved", body = ApiSuccess<Vec<MappingDetailsResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subject Mappings"
)]
pub async fn get_section_mappings(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(section_id): AppPath<Uuid>,
) -> ApiResult<Vec<MappingDetailsResponse>> {
    let mappings = SubjectMappingRepository::new(&state.db)
        .find_for_section(section_id)
        .await?;

    ok(mappings.into_iter().map(Into::into).collect())
}

/// Assign a subject and teacher to a section (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/admin/subject-mappings",
    request_body = MappingRequest,
    responses(
        (status = 201, description = "Subject assigned", body = ApiSuccess<MappingResponse>),
        (status = 400, description = "Validation failed or user is not a teacher"),
        (status = 404, description = "Subject, section or teacher not found"),
        (status = 409, description = "Subject is already assigned to this section"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subject Mappings"
)]
pub async fn create_mapping(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppJson(payload): AppJson<MappingRequest>,
) -> ApiResult<MappingResponse> {
    let input = payload.validate()?;
    let mapping = SubjectMappingRepository::new(&state.db).create(input).await?;

    created(mapping.into())
}

/// Remove an assignment and its timetable slots (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/subject-mappings/{subject_mapping_id}",
    params(
        ("subject_mapping_id" = Uuid, Path, description = "Subject mapping ID")
    ),
    responses(
        (status = 200, description = "Assignment removed", body = ApiSuccess<DeletedResponse>),
        (status = 404, description = "Subject assignment not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subject Mappings"
)]
pub async fn delete_mapping(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(subject_mapping_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    SubjectMappingRepository::new(&state.db)
        .delete(subject_mapping_id)
        .await?;

    ok(DeletedResponse {
        id: subject_mapping_id,
    })
}
