//! Unified error handling for Forkline services.
//!
//! Every request failure funnels into [`ServiceError`]; the
//! [`actix_web::ResponseError`] impl is the single boundary that turns an
//! error into the wire shape `{message, stack?}`. The `stack` field is only
//! populated in debug builds so production responses never leak internals.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Result type shared by Forkline service code
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Application error kinds, one per HTTP failure class.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bearer token missing, malformed, expired, or failing verification.
    /// One message for every sub-case so callers cannot probe which check
    /// failed.
    #[error("Authentication invalid")]
    Unauthenticated,

    /// Login with an unknown email or a wrong password. Same message for
    /// both.
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Principal's role is not in the route's allowed set; carries the
    /// denied role.
    #[error("Forbidden: Role '{0}' is not authorized to access this resource.")]
    Forbidden(String),

    /// Write attempted against a resource outside the principal's country;
    /// carries the principal's country.
    #[error("Country Restriction: Cannot operate on resources outside of your assigned country ({0}).")]
    CountryMismatch(String),

    /// Structural validation failure; message names the first failing field.
    #[error("{0}")]
    InvalidInput(String),

    /// Order state machine rejected a transition; message names the current
    /// status.
    #[error("{0}")]
    InvalidTransition(String),

    /// Resource lookup by ID came up empty.
    #[error("{0}")]
    NotFound(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Catch-all for failures with no client-actionable cause
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated | ServiceError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::Forbidden(_) | ServiceError::CountryMismatch(_) => StatusCode::FORBIDDEN,
            ServiceError::InvalidInput(_) | ServiceError::InvalidTransition(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let stack = if cfg!(debug_assertions) {
            Some(format!("{self:?}"))
        } else {
            None
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.to_string(),
            stack,
        })
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        ServiceError::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::Forbidden("Member".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::CountryMismatch("India".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidTransition("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Database("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forbidden_message_names_role() {
        let err = ServiceError::Forbidden("Member".into());
        assert_eq!(
            err.to_string(),
            "Forbidden: Role 'Member' is not authorized to access this resource."
        );
    }

    #[test]
    fn test_unauthenticated_message_is_uniform() {
        // The same variant is used for missing header, bad scheme, and bad
        // token, so the message never reveals which check failed.
        assert_eq!(
            ServiceError::Unauthenticated.to_string(),
            "Authentication invalid"
        );
    }
}
