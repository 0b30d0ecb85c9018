//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database, token signing, password hashing and the
//! external service clients (image hosting, email).
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only, no rate limiting
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `rate-limit` - Per-client rate limiting via governor

pub mod auth;
pub mod database;
pub mod mail;
pub mod media;
pub mod memory;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConnections;
pub use mail::{LogMailer, SendGridConfig, SendGridMailer};
pub use media::{CloudinaryConfig, CloudinaryImageStore};
pub use memory::InMemoryStore;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
