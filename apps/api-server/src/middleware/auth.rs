//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use blog_core::ports::{AuthError, SessionClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require a signed-in user:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            email: claims.email,
            profile_pic: claims.profile_pic,
        }
    }
}

fn rejection(err: AuthError) -> AppError {
    match err {
        AuthError::MissingAuth => AppError::Unauthorized("Please sign in first".to_string()),
        AuthError::TokenExpired => {
            AppError::Unauthorized("Session expired. Please sign in again".to_string())
        }
        AuthError::InvalidToken(reason) => {
            tracing::debug!(reason = %reason, "Rejected bearer token");
            AppError::Unauthorized("Invalid token".to_string())
        }
        other => AppError::Internal(other.to_string()),
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("AppState not found in app data".to_string()))?;

    // Extract Bearer token from Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| rejection(AuthError::MissingAuth))?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| rejection(AuthError::InvalidToken("Expected Bearer token".to_string())))?;

    state
        .tokens
        .verify_session(token)
        .map(Identity::from)
        .map_err(rejection)
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
