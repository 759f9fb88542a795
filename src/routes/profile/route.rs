use axum::{Router, extract::State, routing::get};

use crate::routes::users::dto::UserDetailsResponse;
use crate::extractor::AuthClaims;
use crate::repositories::UserRepository;
use crate::response::{ApiResult, ApiSuccess, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/api/v1/profile", get(get_profile))
}

/// Get current user profile (requires JWT)
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile retrieved", body = ApiSuccess<UserDetailsResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Profile"
)]
pub async fn get_profile(
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
) -> ApiResult<UserDetailsResponse> {
    let details = UserRepository::new(&state.db)
        .find_details(claims.sub)
        .await?;

    ok(details.into())
}
