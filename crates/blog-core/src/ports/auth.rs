//! Authentication ports: token signing and password hashing.

use uuid::Uuid;

use crate::domain::{PendingAccount, User};

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub exp: i64,
}

/// Token service for the three kinds of signed tokens the platform issues.
///
/// A token of one kind must never validate as another kind.
pub trait TokenService: Send + Sync {
    /// Issue a session token for a signed-in user.
    fn issue_session(&self, user: &User) -> Result<String, AuthError>;

    /// Validate and decode a session token.
    fn verify_session(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Issue a short-lived token carrying an account awaiting activation.
    fn issue_activation(&self, pending: &PendingAccount) -> Result<String, AuthError>;

    fn verify_activation(&self, token: &str) -> Result<PendingAccount, AuthError>;

    /// Issue a short-lived password reset token for an email address.
    fn issue_password_reset(&self, email: &str) -> Result<String, AuthError>;

    /// Returns the email the reset token was issued for.
    fn verify_password_reset(&self, token: &str) -> Result<String, AuthError>;

    /// Lifetime of session tokens.
    fn session_ttl_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
