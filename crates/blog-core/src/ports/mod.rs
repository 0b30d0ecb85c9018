//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod mail;
mod media;
mod rate_limit;
mod read_time;
mod repository;

pub use auth::{AuthError, PasswordService, SessionClaims, TokenService};
pub use mail::{Email, MailError, Mailer};
pub use media::{ImageStore, MediaError, UploadedImage};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use read_time::ReadTimeEstimator;
pub use repository::{
    ArticleRepository, CommentRepository, FollowRepository, ReactionRepository, UserRepository,
};
