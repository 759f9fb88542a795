use axum::extract::{FromRequest, FromRequestParts};
use axum::{RequestPartsExt, http::request::Parts};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;
use crate::jwt::TokenClaims;
use crate::state::AppState;

/// Claims of a caller holding a valid bearer token.
pub struct AuthClaims(pub TokenClaims);

impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = state.jwt.verify(bearer.token()).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(AuthClaims(claims))
    }
}

/// Claims of an ADMIN caller; every `/api/v1/admin` route takes this.
pub struct AdminClaims(pub TokenClaims);

impl FromRequestParts<AppState> for AdminClaims {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthClaims(claims) = AuthClaims::from_request_parts(parts, state).await?;

        if claims.role != RoleEnum::Admin {
            return Err(AppError::Forbidden(
                "Only admin can access this resource".to_string(),
            ));
        }

        Ok(AdminClaims(claims))
    }
}

/// `Json` whose rejection renders through `AppError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
