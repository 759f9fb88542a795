use axum::{
    Router,
    extract::State,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{TimeSlotDetailsResponse, TimeSlotRequest, TimeSlotResponse};
use crate::error::AppError;
use crate::extractor::{AdminClaims, AppJson, AppPath, AuthClaims};
use crate::repositories::{TimeTableRepository, UserRepository};
use crate::response::{ApiResult, ApiSuccess, DeletedResponse, created, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/admin/sections/{section_id}/timetable",
            get(get_section_timetable),
        )
        .route("/api/v1/admin/timetable", post(create_time_slot))
        .route(
            "/api/v1/admin/timetable/{time_table_id}",
            delete(delete_time_slot),
        )
        .route("/api/v1/timetable/me", get(get_my_timetable))
}

/// Weekly timetable of a section, by day then start time (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/sections/{section_id}/timetable",
    params(
        ("section_id" = Uuid, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Timetable retrieved", body = ApiSuccess<Vec<TimeSlotDetailsResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
pub async fn get_section_timetable(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(section_id): AppPath<Uuid>,
) -> ApiResult<Vec<TimeSlotDetailsResponse>> {
    let slots = TimeTableRepository::new(&state.db)
        .find_for_section(section_id)
        .await?;

    ok(slots.into_iter().map(Into::into).collect())
}

/// Schedule a class (Admin only)
///
/// Rejected when the section, or the assigned teacher in any section,
/// already has a class overlapping the requested time on that day.
#[utoipa::path(
    post,
    path = "/api/v1/admin/timetable",
    request_body = TimeSlotRequest,
    responses(
        (status = 201, description = "Slot created", body = ApiSuccess<TimeSlotResponse>),
        (status = 400, description = "Validation failed or invalid subject assignment"),
        (status = 409, description = "Section or teacher already booked"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
pub async fn create_time_slot(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppJson(payload): AppJson<TimeSlotRequest>,
) -> ApiResult<TimeSlotResponse> {
    let input = payload.validate()?;
    let slot = TimeTableRepository::new(&state.db).create(input).await?;

    created(slot.into())
}

/// Delete a timetable slot (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/timetable/{time_table_id}",
    params(
        ("time_table_id" = Uuid, Path, description = "Timetable slot ID")
    ),
    responses(
        (status = 200, description = "Slot deleted", body = ApiSuccess<DeletedResponse>),
        (status = 404, description = "Timetable slot not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
pub async fn delete_time_slot(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(time_table_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    TimeTableRepository::new(&state.db)
        .delete(time_table_id)
        .await?;

    ok(DeletedResponse { id: time_table_id })
}

/// Timetable of the caller (Teacher/Student)
///
/// Teachers see their classes across sections, students their section's
/// classes. Admins get an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/timetable/me",
    responses(
        (status = 200, description = "Timetable retrieved", body = ApiSuccess<Vec<TimeSlotDetailsResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
pub async fn get_my_timetable(
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
) -> ApiResult<Vec<TimeSlotDetailsResponse>> {
    let user = UserRepository::new(&state.db)
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    let slots = TimeTableRepository::new(&state.db)
        .find_for_user(&user)
        .await?;

    ok(slots.into_iter().map(Into::into).collect())
}
