//! Error handling - every failure leaves as an `ApiResponse` envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use quill_core::FieldErrors;
use quill_core::error::DomainError;
use quill_core::ports::AuthError;
use quill_shared::ApiResponse;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type that converts to envelope responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed JSON, path or query input.
    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Details are logged, never sent to the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(fields) => {
                let details = serde_json::to_value(fields).unwrap_or_default();
                ApiResponse::error(self.to_string()).with_details(details)
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                ApiResponse::error(INTERNAL_MESSAGE)
            }
            other => ApiResponse::error(other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{entity_type} not found"))
            }
            DomainError::Validation(fields) => AppError::Validation(fields),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Store(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => AppError::Forbidden,
            AuthError::MissingCredentials => {
                AppError::Unauthorized("Authentication required".to_string())
            }
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken(reason) => {
                tracing::debug!(%reason, "Rejected bearer token");
                AppError::Unauthorized("Invalid token".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid JSON body: {err}")).into()
}

pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query string: {err}")).into()
}

pub fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid path parameter: {err}")).into()
}
