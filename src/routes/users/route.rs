use axum::{
    Router,
    extract::State,
    routing::{get, put},
};
use uuid::Uuid;

use super::dto::{UserDetailsResponse, UserQuery, UserRequest, UserResponse};
use crate::extractor::{AdminClaims, AppJson, AppPath, AppQuery};
use crate::repositories::UserRepository;
use crate::response::{ApiResult, ApiSuccess, DeletedResponse, created, ok};
use crate::state::AppState;
use crate::validation::optional_text;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/users", get(get_all_users).post(create_user))
        .route(
            "/api/v1/admin/users/{user_id}",
            put(update_user).delete(delete_user),
        )
}

/// Get users, newest first, filtered by role and name/email (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(UserQuery),
    responses(
        (status = 200, description = "Users retrieved", body = ApiSuccess<Vec<UserDetailsResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_all_users(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UserQuery>,
) -> ApiResult<Vec<UserDetailsResponse>> {
    let users = UserRepository::new(&state.db)
        .find_all(query.role, optional_text(query.query))
        .await?;

    ok(users.into_iter().map(Into::into).collect())
}

/// Create a user of any role (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/admin/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = ApiSuccess<UserResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Department, batch or section not found"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserRequest>,
) -> ApiResult<UserResponse> {
    let input = payload.validate(true)?;
    let user = UserRepository::new(&state.db)
        .create(input, state.password_hash_cost)
        .await?;

    created(user.into())
}

/// Update user (Admin only)
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiSuccess<UserResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UserRequest>,
) -> ApiResult<UserResponse> {
    let input = payload.validate(false)?;
    let user = UserRepository::new(&state.db)
        .update(user_id, input, state.password_hash_cost)
        .await?;

    ok(user.into())
}

/// Delete user (Admin only)
///
/// Teachers with subject assignments cannot be deleted, and neither can
/// the calling admin.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = ApiSuccess<DeletedResponse>),
        (status = 400, description = "Cannot delete own account"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still has subject assignments"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    AdminClaims(claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    UserRepository::new(&state.db)
        .delete(user_id, claims.sub)
        .await?;

    ok(DeletedResponse { id: user_id })
}
