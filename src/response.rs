use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Success half of the `{success, data}` / `{success, error}` union.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

pub type ApiResult<T> = AppResult<(StatusCode, Json<ApiSuccess<T>>)>;

pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiSuccess { success: true, data })))
}

pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiSuccess { success: true, data })))
}

/// Body of every successful delete.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub id: uuid::Uuid,
}
