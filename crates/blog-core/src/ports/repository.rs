use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Article, ArticleContent, Comment, Reaction, User};
use crate::error::RepoError;
use crate::feed::{SortOrder, Window};

/// User repository.
///
/// Every `User` it returns has `posts` filled with the ids of the articles
/// the user authored, oldest first.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Load several users at once. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    async fn list(&self) -> Result<Vec<User>, RepoError>;

    /// Insert a new user. A taken email is a `RepoError::Constraint`.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Replace the password hash of the account with `email`.
    /// Returns `false` when no such account exists.
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, RepoError>;
}

/// Article repository.
///
/// Articles come back with `likes`, `dislikes` and `comments` filled in.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert a new article. The author's `posts` reflects it as soon as
    /// this returns; there is no separate back-reference write.
    async fn insert(&self, article: Article) -> Result<Article, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError>;

    /// Overwrite the editable fields of article `id` if, and only if, it is
    /// authored by `author_id`. `None` means no such owned article.
    async fn update_owned(
        &self,
        id: Uuid,
        author_id: Uuid,
        content: ArticleContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Article>, RepoError>;

    /// Atomically check ownership and delete article `id`, together with its
    /// comments and reactions. Returns the article as it was before removal,
    /// or `None` when it does not exist or belongs to someone else.
    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> Result<Option<Article>, RepoError>;

    /// Exact number of articles created inside `window`.
    async fn count_in_window(&self, window: Window) -> Result<u64, RepoError>;

    /// One slice of the articles inside `window`, sorted by creation time
    /// (ties broken by id in the same direction).
    async fn find_in_window(
        &self,
        window: Window,
        order: SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Article>, RepoError>;

    /// Every article, oldest first.
    async fn list(&self) -> Result<Vec<Article>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError>;

    /// Comments on an article, oldest first.
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Per-user reaction state on articles.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Current reaction; `Reaction::None` when the user never reacted.
    async fn get(&self, user_id: Uuid, article_id: Uuid) -> Result<Reaction, RepoError>;

    /// Store a reaction. Setting `Reaction::None` forgets the row.
    async fn set(&self, user_id: Uuid, article_id: Uuid, reaction: Reaction)
    -> Result<(), RepoError>;
}

/// Follow relationships between users.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Returns `false` when `follower_id` already followed `followed_id`.
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    /// Returns `false` when there was nothing to remove.
    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    /// Ids of the users following `user_id`.
    async fn followers(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Ids of the users `user_id` follows.
    async fn following(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;
}
