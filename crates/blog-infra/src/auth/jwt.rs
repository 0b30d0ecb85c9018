//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::domain::{PendingAccount, User};
use blog_core::ports::{AuthError, SessionClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of sign-in sessions.
    pub session_ttl: TimeDelta,
    /// Lifetime of activation and password reset links.
    pub link_ttl: TimeDelta,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            session_ttl: TimeDelta::days(7),
            link_ttl: TimeDelta::minutes(5),
            issuer: "my-blog-api".to_string(),
        }
    }
}

/// What a token may be used for. Checked on every decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TokenKind {
    Session,
    Activation,
    PasswordReset,
}

trait Kinded {
    fn kind(&self) -> TokenKind;
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionToken {
    sub: String, // user_id
    username: String,
    email: String,
    profile_pic: Option<String>,
    kind: TokenKind,
    exp: i64,
    iat: i64,
    iss: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ActivationToken {
    #[serde(flatten)]
    account: PendingAccount,
    kind: TokenKind,
    exp: i64,
    iat: i64,
    iss: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResetToken {
    email: String,
    kind: TokenKind,
    exp: i64,
    iat: i64,
    iss: String,
}

impl Kinded for SessionToken {
    fn kind(&self) -> TokenKind {
        self.kind
    }
}

impl Kinded for ActivationToken {
    fn kind(&self) -> TokenKind {
        self.kind
    }
}

impl Kinded for ResetToken {
    fn kind(&self) -> TokenKind {
        self.kind
    }
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let defaults = JwtConfig::default();
        let config = JwtConfig {
            secret,
            session_ttl: std::env::var("SESSION_TTL_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(TimeDelta::days)
                .unwrap_or(defaults.session_ttl),
            link_ttl: std::env::var("LINK_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(TimeDelta::minutes)
                .unwrap_or(defaults.link_ttl),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };
        Self::new(config)
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn open<C>(&self, token: &str, expected: TokenKind) -> Result<C, AuthError>
    where
        C: DeserializeOwned + Kinded,
    {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<C>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        if token_data.claims.kind() != expected {
            return Err(AuthError::InvalidToken(format!(
                "expected a {:?} token",
                expected
            )));
        }
        Ok(token_data.claims)
    }
}

impl TokenService for JwtTokenService {
    fn issue_session(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        self.sign(&SessionToken {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            profile_pic: user.profile_pic.clone(),
            kind: TokenKind::Session,
            exp: (now + self.config.session_ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        })
    }

    fn verify_session(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let claims: SessionToken = self.open(token, TokenKind::Session)?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(SessionClaims {
            user_id,
            username: claims.username,
            email: claims.email,
            profile_pic: claims.profile_pic,
            exp: claims.exp,
        })
    }

    fn issue_activation(&self, pending: &PendingAccount) -> Result<String, AuthError> {
        let now = Utc::now();
        self.sign(&ActivationToken {
            account: pending.clone(),
            kind: TokenKind::Activation,
            exp: (now + self.config.link_ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        })
    }

    fn verify_activation(&self, token: &str) -> Result<PendingAccount, AuthError> {
        let claims: ActivationToken = self.open(token, TokenKind::Activation)?;
        Ok(claims.account)
    }

    fn issue_password_reset(&self, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        self.sign(&ResetToken {
            email: email.to_string(),
            kind: TokenKind::PasswordReset,
            exp: (now + self.config.link_ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        })
    }

    fn verify_password_reset(&self, token: &str) -> Result<String, AuthError> {
        let claims: ResetToken = self.open(token, TokenKind::PasswordReset)?;
        Ok(claims.email)
    }

    fn session_ttl_seconds(&self) -> i64 {
        self.config.session_ttl.num_seconds()
    }
}
