use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

use crate::validation::FieldErrors;

pub type AppResult<T> = Result<T, AppError>;

/// Failure result of every operation. Rendered as
/// `{"success": false, "error": "..."}` at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Duplicate natural keys and timetable clashes.
    #[error("{0}")]
    Conflict(String),

    /// Foreign-key violations, typically a delete of a referenced row.
    #[error("{0}")]
    Constraint(String),

    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: DbErr,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Constraint(_) => StatusCode::CONFLICT,
            AppError::Database { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<DbErr> for AppError {
    fn from(source: DbErr) -> Self {
        AppError::Database {
            message: "Database operation failed".to_string(),
            source,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Validation(errors) => ErrorBody {
                success: false,
                error: "Validation failed".to_string(),
                field_errors: Some(errors),
            },
            AppError::Database { message, source } => {
                tracing::error!(error = %source, "{}", message);
                ErrorBody {
                    success: false,
                    error: message,
                    field_errors: None,
                }
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "Internal error");
                ErrorBody {
                    success: false,
                    error: "Internal server error".to_string(),
                    field_errors: None,
                }
            }
            other => ErrorBody {
                success: false,
                error: other.to_string(),
                field_errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Attaches user-facing messages to database results.
pub trait DbResultExt<T> {
    /// Any database error becomes `Database` with `failure` as its message.
    fn db_context(self, failure: &str) -> AppResult<T>;

    /// A unique-index violation becomes `Conflict(duplicate)`.
    fn on_duplicate(self, duplicate: &str, failure: &str) -> AppResult<T>;

    /// A foreign-key violation becomes `Constraint(in_use)`.
    fn on_in_use(self, in_use: &str) -> AppResult<T>;
}

impl<T> DbResultExt<T> for Result<T, DbErr> {
    fn db_context(self, failure: &str) -> AppResult<T> {
        self.map_err(|source| AppError::Database {
            message: failure.to_string(),
            source,
        })
    }

    fn on_duplicate(self, duplicate: &str, failure: &str) -> AppResult<T> {
        self.map_err(|source| match source.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(duplicate.to_string()),
            _ => AppError::Database {
                message: failure.to_string(),
                source,
            },
        })
    }

    fn on_in_use(self, in_use: &str) -> AppResult<T> {
        self.map_err(|source| match source.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                tracing::warn!(error = %source, "Rejected by foreign key");
                AppError::Constraint(in_use.to_string())
            }
            _ => AppError::Database {
                message: in_use.to_string(),
                source,
            },
        })
    }
}
