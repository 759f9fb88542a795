use axum::{Router, extract::State, routing::get};

use super::dto::DashboardStatsResponse;
use crate::extractor::AdminClaims;
use crate::repositories::StatsRepository;
use crate::response::{ApiResult, ApiSuccess, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/api/v1/admin/stats", get(get_dashboard_stats))
}

/// Dashboard counters (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Statistics retrieved", body = ApiSuccess<DashboardStatsResponse>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn get_dashboard_stats(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
) -> ApiResult<DashboardStatsResponse> {
    let stats = StatsRepository::new(&state.db).dashboard().await?;

    ok(stats.into())
}
