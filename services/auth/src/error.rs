//! Custom error types for the authentication service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the authentication service
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid or missing input fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, malformed, or expired bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad email/password combination
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistence collaborator unreachable or timed out
    #[error("Service unavailable")]
    ServiceUnavailable,

    /// Unexpected error
    #[error("Internal server error")]
    Internal,
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AuthError::Conflict("El email ya está registrado".to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                error!("Database unavailable: {}", err);
                AuthError::ServiceUnavailable
            }
            _ => {
                error!("Database error: {}", err);
                AuthError::Internal
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "No está autorizado para acceder a esta ruta".to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Credenciales inválidas".to_string(),
            ),
            AuthError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AuthError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AuthError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "El servicio de datos no está disponible".to_string(),
            ),
            AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor".to_string(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_service_unavailable() {
        let err = AuthError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AuthError::ServiceUnavailable));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AuthError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AuthError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AuthError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                AuthError::ServiceUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AuthError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
