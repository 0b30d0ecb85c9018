//! In-memory store implementing every repository port.
//!
//! Used as the fallback when no database is configured, and by tests.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Article, ArticleContent, Comment, Reaction, User};
use blog_core::error::RepoError;
use blog_core::feed::{SortOrder, Window};
use blog_core::ports::{
    ArticleRepository, CommentRepository, FollowRepository, ReactionRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    /// Keyed by (article_id, user_id).
    reactions: BTreeMap<(Uuid, Uuid), Reaction>,
    /// (follower_id, followed_id) in follow order.
    follows: Vec<(Uuid, Uuid)>,
}

impl Tables {
    fn hydrate_user(&self, user: &User) -> User {
        let mut user = user.clone();
        user.posts = self
            .articles
            .iter()
            .filter(|a| a.author_id == user.id)
            .map(|a| a.id)
            .collect();
        user
    }

    fn hydrate_article(&self, article: &Article) -> Article {
        let mut article = article.clone();
        let reactions = self
            .reactions
            .range((article.id, Uuid::nil())..=(article.id, Uuid::from_u128(u128::MAX)));
        article.likes.clear();
        article.dislikes.clear();
        for (&(_, user_id), reaction) in reactions {
            match reaction {
                Reaction::Liked => article.likes.push(user_id),
                Reaction::Disliked => article.dislikes.push(user_id),
                Reaction::None => {}
            }
        }
        article.comments = self
            .comments
            .iter()
            .filter(|c| c.article_id == article.id)
            .map(|c| c.id)
            .collect();
        article
    }
}

/// Thread-safe in-memory store using an async RwLock.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| tables.hydrate_user(u)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| tables.hydrate_user(u)))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .map(|u| tables.hydrate_user(u))
            .collect())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().map(|u| tables.hydrate_user(u)).collect())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }
        let mut stored = user;
        stored.posts.clear();
        tables.users.push(stored.clone());
        Ok(stored)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ArticleRepository for InMemoryStore {
    async fn insert(&self, article: Article) -> Result<Article, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == article.author_id) {
            return Err(RepoError::MissingReference(format!(
                "author {} does not exist",
                article.author_id
            )));
        }
        let mut stored = article;
        stored.likes.clear();
        stored.dislikes.clear();
        stored.comments.clear();
        tables.articles.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .iter()
            .find(|a| a.id == id)
            .map(|a| tables.hydrate_article(a)))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        author_id: Uuid,
        content: ArticleContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Article>, RepoError> {
        let mut tables = self.tables.write().await;
        let Some(article) = tables
            .articles
            .iter_mut()
            .find(|a| a.id == id && a.author_id == author_id)
        else {
            return Ok(None);
        };
        article.apply(content, updated_at);
        let updated = article.clone();
        Ok(Some(tables.hydrate_article(&updated)))
    }

    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> Result<Option<Article>, RepoError> {
        // One write lock spans check, article removal and the cascade.
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .articles
            .iter()
            .position(|a| a.id == id && a.author_id == author_id)
        else {
            return Ok(None);
        };

        let removed = tables.hydrate_article(&tables.articles[index]);
        tables.articles.remove(index);
        tables.comments.retain(|c| c.article_id != id);
        tables.reactions.retain(|(article_id, _), _| *article_id != id);
        Ok(Some(removed))
    }

    async fn count_in_window(&self, window: Window) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .iter()
            .filter(|a| window.contains(a.created_at))
            .count() as u64)
    }

    async fn find_in_window(
        &self,
        window: Window,
        order: SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Article>, RepoError> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&Article> = tables
            .articles
            .iter()
            .filter(|a| window.contains(a.created_at))
            .collect();

        matching.sort_by_key(|a| (a.created_at, a.id));
        if order == SortOrder::Descending {
            matching.reverse();
        }

        Ok(matching
            .into_iter()
            .skip(to_index(offset))
            .take(to_index(limit))
            .map(|a| tables.hydrate_article(a))
            .collect())
    }

    async fn list(&self) -> Result<Vec<Article>, RepoError> {
        let tables = self.tables.read().await;
        let mut all: Vec<Article> = tables
            .articles
            .iter()
            .map(|a| tables.hydrate_article(a))
            .collect();
        all.sort_by_key(|a| (a.created_at, a.id));
        Ok(all)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.articles.iter().any(|a| a.id == comment.article_id) {
            return Err(RepoError::MissingReference(format!(
                "article {} does not exist",
                comment.article_id
            )));
        }
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn get(&self, user_id: Uuid, article_id: Uuid) -> Result<Reaction, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reactions
            .get(&(article_id, user_id))
            .copied()
            .unwrap_or_default())
    }

    async fn set(
        &self,
        user_id: Uuid,
        article_id: Uuid,
        reaction: Reaction,
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        match reaction {
            Reaction::None => {
                tables.reactions.remove(&(article_id, user_id));
            }
            other => {
                tables.reactions.insert((article_id, user_id), other);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.follows.contains(&(follower_id, followed_id)) {
            return Ok(false);
        }
        tables.follows.push((follower_id, followed_id));
        Ok(true)
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.follows.len();
        tables
            .follows
            .retain(|pair| *pair != (follower_id, followed_id));
        Ok(tables.follows.len() != before)
    }

    async fn followers(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|(_, followed)| *followed == user_id)
            .map(|(follower, _)| *follower)
            .collect())
    }

    async fn following(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .map(|(_, followed)| *followed)
            .collect())
    }
}
