use anyhow::anyhow;
use axum::{Router, extract::State, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::config::TOKEN_TYPE;
use crate::error::AppError;
use crate::extractor::AppJson;
use crate::repositories::UserRepository;
use crate::response::{ApiResult, ApiSuccess, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/api/v1/auth/login", post(login))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiSuccess<LoginResponse>),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = UserRepository::new(&state.db)
        .authenticate(payload.email.trim(), &payload.password)
        .await?;

    let access_token = state
        .jwt
        .create_jwt(user.user_id, &user.name, user.role)
        .map_err(|e| AppError::Internal(anyhow!("Failed to create token: {}", e)))?;

    tracing::info!(user_id = %user.user_id, role = %user.role, "User logged in");

    ok(LoginResponse {
        access_token,
        token_type: TOKEN_TYPE.to_string(),
        expires_in: state.jwt.expires_in(),
        user: user.into(),
    })
}
