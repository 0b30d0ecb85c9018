//! Error handling - every failure renders as `{"error": "..."}`.

use actix_web::{
    HttpRequest, HttpResponse, ResponseError, error::InternalError, error::JsonPayloadError,
    http::StatusCode,
};
use blog_core::DomainError;
use blog_shared::ErrorResponse;
use std::fmt;

use crate::observability::RequestId;

/// Message sent for every failure whose cause stays server-side.
pub const SERVER_ERROR: &str = "Server Error, Please try again";

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    /// Logged in full; the client only sees [`SERVER_ERROR`].
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Conflict(msg) => write!(f, "{}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Conflict(msg) => ErrorResponse::new(msg.as_str()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::new(SERVER_ERROR)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotAuthor(_)
            | DomainError::InvalidCredentials
            | DomainError::LinkExpired => AppError::BadRequest(err.to_string()),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Upstream(_) | DomainError::Internal(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Render malformed JSON bodies as `{"error": ...}` tagged with the request id.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let mut body = ErrorResponse::new(format!("Invalid request body: {}", err));
    if let Some(request_id) = RequestId::of(req) {
        body = body.with_request_id(request_id.as_str());
    }

    let response = HttpResponse::BadRequest().json(body);
    InternalError::from_response(err, response).into()
}
