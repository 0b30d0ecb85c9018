//! Comments, reactions and follows.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    Article, AuthoredArticle, AuthoredComment, Comment, PublicUser, Reaction, User,
};
use crate::error::DomainError;
use crate::feed::attach_authors;
use crate::ports::{
    ArticleRepository, CommentRepository, FollowRepository, ReactionRepository, UserRepository,
};

/// A user as seen on their profile page.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
}

pub struct EngagementService {
    articles: Arc<dyn ArticleRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
    reactions: Arc<dyn ReactionRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl EngagementService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
        reactions: Arc<dyn ReactionRepository>,
        follows: Arc<dyn FollowRepository>,
    ) -> Self {
        Self {
            articles,
            users,
            comments,
            reactions,
            follows,
        }
    }

    /// Add a comment and return the article with its updated comment list.
    pub async fn add_comment(
        &self,
        article_id: Uuid,
        author_id: Uuid,
        text: String,
    ) -> Result<(AuthoredArticle, AuthoredComment), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation("Comment cannot be empty".to_string()));
        }
        self.require_article(article_id).await?;

        let comment = self
            .comments
            .insert(Comment::new(article_id, author_id, text))
            .await?;
        let author = self.public_user(author_id).await?;

        let article = self.authored(self.require_article(article_id).await?).await?;
        Ok((article, AuthoredComment { comment, author }))
    }

    /// Comments on an article, oldest first, with their authors.
    pub async fn comments(&self, article_id: Uuid) -> Result<Vec<AuthoredComment>, DomainError> {
        self.require_article(article_id).await?;
        let comments = self.comments.find_by_article(article_id).await?;

        let mut author_ids: Vec<Uuid> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<Uuid, PublicUser> = self
            .users
            .find_many(&author_ids)
            .await?
            .iter()
            .map(|u| (u.id, u.public()))
            .collect();

        comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.author_id).cloned().ok_or_else(|| {
                    DomainError::Internal(format!("author of comment {} is missing", comment.id))
                })?;
                Ok(AuthoredComment { comment, author })
            })
            .collect()
    }

    /// Delete a comment written by `actor`.
    pub async fn delete_comment(&self, comment_id: Uuid, actor: Uuid) -> Result<Comment, DomainError> {
        let comment = match self.comments.find_by_id(comment_id).await? {
            Some(comment) if comment.author_id == actor => comment,
            _ => return Err(DomainError::NotAuthor("comment")),
        };
        self.comments.delete(comment_id).await?;
        Ok(comment)
    }

    /// Press "like" on an article.
    pub async fn like(&self, article_id: Uuid, user_id: Uuid) -> Result<AuthoredArticle, DomainError> {
        self.react(article_id, user_id, Reaction::toggle_like).await
    }

    /// Press "dislike" on an article.
    pub async fn dislike(
        &self,
        article_id: Uuid,
        user_id: Uuid,
    ) -> Result<AuthoredArticle, DomainError> {
        self.react(article_id, user_id, Reaction::toggle_dislike)
            .await
    }

    async fn react(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        press: fn(Reaction) -> Reaction,
    ) -> Result<AuthoredArticle, DomainError> {
        self.require_article(article_id).await?;

        let current = self.reactions.get(user_id, article_id).await?;
        let next = press(current);
        self.reactions.set(user_id, article_id, next).await?;

        tracing::debug!(
            article_id = %article_id,
            from = current.as_str(),
            to = next.as_str(),
            "Reaction changed"
        );

        self.authored(self.require_article(article_id).await?).await
    }

    /// Start following `target`. Following twice is a no-op.
    pub async fn follow(&self, actor: Uuid, target: Uuid) -> Result<Profile, DomainError> {
        if actor == target {
            return Err(DomainError::Validation("You cannot follow yourself".to_string()));
        }
        self.require_user(target).await?;

        self.follows.follow(actor, target).await?;
        self.profile(target).await
    }

    /// Stop following `target`.
    pub async fn unfollow(&self, actor: Uuid, target: Uuid) -> Result<Profile, DomainError> {
        if actor == target {
            return Err(DomainError::Validation("You cannot unfollow yourself".to_string()));
        }
        self.require_user(target).await?;

        self.follows.unfollow(actor, target).await?;
        self.profile(target).await
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<Profile, DomainError> {
        let user = self.require_user(user_id).await?;
        let followers = self.follows.followers(user_id).await?;
        let following = self.follows.following(user_id).await?;

        Ok(Profile {
            user,
            followers,
            following,
        })
    }

    async fn require_article(&self, article_id: Uuid) -> Result<Article, DomainError> {
        self.articles
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Article not found".to_string()))
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found.".to_string()))
    }

    async fn public_user(&self, user_id: Uuid) -> Result<PublicUser, DomainError> {
        Ok(self.require_user(user_id).await?.public())
    }

    async fn authored(&self, article: Article) -> Result<AuthoredArticle, DomainError> {
        attach_authors(self.users.as_ref(), vec![article])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal("article vanished".to_string()))
    }
}
