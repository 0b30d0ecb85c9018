//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::feed::FeedEngine;
use blog_core::ports::{
    ArticleRepository, CommentRepository, FollowRepository, ImageStore, Mailer, PasswordService,
    ReactionRepository, TokenService, UserRepository,
};
use blog_core::services::{
    AccountLinks, AccountService, ArticleService, EngagementService, WordsPerMinute,
};
use blog_infra::{
    Argon2PasswordService, CloudinaryConfig, CloudinaryImageStore, InMemoryStore, JwtTokenService,
    LogMailer, SendGridConfig, SendGridMailer,
};

#[cfg(feature = "postgres")]
use blog_infra::database::{
    DatabaseConnections, PostgresArticleRepository, PostgresCommentRepository,
    PostgresFollowRepository, PostgresReactionRepository, PostgresUserRepository,
};

#[cfg(feature = "rate-limit")]
use blog_core::ports::RateLimiter;
#[cfg(feature = "rate-limit")]
use blog_infra::InMemoryRateLimiter;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedEngine>,
    pub articles: Arc<ArticleService>,
    pub accounts: Arc<AccountService>,
    pub engagement: Arc<EngagementService>,
    pub tokens: Arc<dyn TokenService>,
    /// `None` when no image host is configured.
    pub images: Option<Arc<dyn ImageStore>>,
    #[cfg(feature = "rate-limit")]
    pub limiter: Arc<dyn RateLimiter>,
}

/// One handle per repository port.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub follows: Arc<dyn FollowRepository>,
}

impl Repositories {
    /// Every port backed by the same in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            articles: store.clone(),
            comments: store.clone(),
            reactions: store.clone(),
            follows: store,
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            articles: Arc::new(PostgresArticleRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            reactions: Arc::new(PostgresReactionRepository::new(db.clone())),
            follows: Arc::new(PostgresFollowRepository::new(db.clone())),
        }
    }
}

/// Outbound collaborators of the services.
pub struct Clients {
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub mailer: Arc<dyn Mailer>,
    pub images: Option<Arc<dyn ImageStore>>,
    #[cfg(feature = "rate-limit")]
    pub limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repositories = Self::repositories(config).await;

        let mailer: Arc<dyn Mailer> = match SendGridConfig::from_env() {
            Some(sendgrid) => Arc::new(SendGridMailer::new(sendgrid)),
            None => {
                tracing::warn!("MAIL_KEY not set. Emails will only be logged.");
                Arc::new(LogMailer)
            }
        };

        let images: Option<Arc<dyn ImageStore>> = match CloudinaryConfig::from_env() {
            Some(cloudinary) => Some(Arc::new(CloudinaryImageStore::new(cloudinary))),
            None => {
                tracing::warn!("Cloudinary credentials not set. Image uploads are disabled.");
                None
            }
        };

        let clients = Clients {
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            mailer,
            images,
            #[cfg(feature = "rate-limit")]
            limiter: Arc::new(InMemoryRateLimiter::from_env()),
        };

        let state = Self::from_parts(repositories, clients, config.links.clone());
        tracing::info!("Application state initialized");
        state
    }

    /// Wire the services over the given repositories and clients.
    pub fn from_parts(repos: Repositories, clients: Clients, links: AccountLinks) -> Self {
        let feed = FeedEngine::new(repos.articles.clone(), repos.users.clone());
        let articles = ArticleService::new(
            repos.articles.clone(),
            repos.users.clone(),
            Arc::new(WordsPerMinute::default()),
        );
        let accounts = AccountService::new(
            repos.users.clone(),
            clients.passwords,
            clients.tokens.clone(),
            clients.mailer,
            links,
        );
        let engagement = EngagementService::new(
            repos.articles,
            repos.users,
            repos.comments,
            repos.reactions,
            repos.follows,
        );

        Self {
            feed: Arc::new(feed),
            articles: Arc::new(articles),
            accounts: Arc::new(accounts),
            engagement: Arc::new(engagement),
            tokens: clients.tokens,
            images: clients.images,
            #[cfg(feature = "rate-limit")]
            limiter: clients.limiter,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
            return Repositories::in_memory(Arc::new(InMemoryStore::new()));
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => Repositories::postgres(&connections),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Repositories::in_memory(Arc::new(InMemoryStore::new()))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory store");
        Repositories::in_memory(Arc::new(InMemoryStore::new()))
    }
}
