use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

use crate::identity::permissions::Permission;

/// Authentication and authorization failures.
///
/// Every credential failure collapses into `InvalidCredentials`; the concrete
/// reason is only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Missing permission: {0:?}")]
    Forbidden(Permission),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Turn unique-key violations into a validation error on `field`; any
    /// other storage failure passes through untouched.
    pub fn from_unique(field: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(field, detail = %detail, "unique_violation");
                Self::invalid(field, "already exists")
            }
            _ => Self::Storage(err),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Storage(e) => {
                tracing::error!("Storage error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Storage failure" }),
                )
            }
            Self::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": message, "field": field }),
            ),
            Self::Auth(AuthError::Forbidden(permission)) => {
                tracing::warn!(?permission, "access_denied");
                (StatusCode::FORBIDDEN, json!({ "error": "Access denied" }))
            }
            Self::Auth(e) => (StatusCode::UNAUTHORIZED, json!({ "error": e.to_string() })),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Configuration error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_hide_details() {
        let response =
            AppError::Storage(DbErr::Custom("relation ctd_cast_log missing".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_failures_map_to_401_and_403() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::Forbidden(Permission::ManageUsers))
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn validation_carries_field() {
        let err = AppError::invalid("begin_latitude", "must be within [-90, 90]");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid begin_latitude: must be within [-90, 90]");
    }
}
