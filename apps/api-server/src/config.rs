//! Application configuration loaded from environment variables.

use std::env;

use blog_core::services::AccountLinks;
use blog_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub links: AccountLinks,
    /// Largest accepted request body, in bytes. Bounds image uploads.
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3005),
            database: DatabaseConfig::from_env(),
            links: AccountLinks {
                client_url: env::var("CLIENT_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
                email_from: env::var("EMAIL_FROM")
                    .unwrap_or_else(|_| "noreply@myblog.local".to_string()),
            },
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }
}
