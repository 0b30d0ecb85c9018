//! Article aggregate mutator: create, edit and delete under the ownership rule.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Article, ArticleContent, ArticleDraft, AuthoredArticle, User};
use crate::error::DomainError;
use crate::feed::attach_authors;
use crate::ports::{ArticleRepository, ReadTimeEstimator, UserRepository};

/// A freshly created article and its author with the new post recorded.
#[derive(Debug, Clone)]
pub struct PublishedArticle {
    pub article: AuthoredArticle,
    pub author: User,
}

/// A deleted article and its author with the post removed.
#[derive(Debug, Clone)]
pub struct RemovedArticle {
    pub article: Article,
    pub author: User,
}

pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    users: Arc<dyn UserRepository>,
    read_time: Arc<dyn ReadTimeEstimator>,
}

impl ArticleService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        users: Arc<dyn UserRepository>,
        read_time: Arc<dyn ReadTimeEstimator>,
    ) -> Self {
        Self {
            articles,
            users,
            read_time,
        }
    }

    /// Publish a new article for `author_id`.
    pub async fn create(
        &self,
        author_id: Uuid,
        draft: ArticleDraft,
    ) -> Result<PublishedArticle, DomainError> {
        let content = self.content_from(draft)?;

        let author = self.load_author(author_id).await?;
        let saved = self.articles.insert(Article::new(author.id, content)).await?;

        // Re-read so `posts` includes the new id.
        let author = self.load_author(author_id).await?;

        tracing::info!(article_id = %saved.id, author_id = %author_id, "Article created");

        Ok(PublishedArticle {
            article: AuthoredArticle {
                author: author.public(),
                article: saved,
            },
            author,
        })
    }

    /// Overwrite title, thumbnail, body, tags and read time of an article
    /// owned by `actor`. Author and engagement are left as they are.
    pub async fn edit(
        &self,
        actor: Uuid,
        article_id: Uuid,
        draft: ArticleDraft,
    ) -> Result<AuthoredArticle, DomainError> {
        let content = self.content_from(draft)?;

        let updated = self
            .articles
            .update_owned(article_id, actor, content, Utc::now())
            .await?
            .ok_or(DomainError::NotAuthor("article"))?;

        tracing::info!(article_id = %article_id, "Article edited");

        let mut authored = attach_authors(self.users.as_ref(), vec![updated]).await?;
        authored
            .pop()
            .ok_or_else(|| DomainError::Internal("edited article vanished".to_string()))
    }

    /// Delete an article owned by `actor`. A missing article and someone
    /// else's article are reported the same way, and nothing is changed.
    pub async fn delete(&self, actor: Uuid, article_id: Uuid) -> Result<RemovedArticle, DomainError> {
        match self.articles.find_by_id(article_id).await? {
            Some(article) if article.author_id == actor => {}
            _ => return Err(DomainError::NotAuthor("article")),
        }

        // The repository re-checks ownership inside its transaction.
        let deleted = self
            .articles
            .delete_owned(article_id, actor)
            .await?
            .ok_or(DomainError::NotAuthor("article"))?;

        let author = self.load_author(actor).await?;

        tracing::info!(article_id = %article_id, author_id = %actor, "Article deleted");

        Ok(RemovedArticle {
            article: deleted,
            author,
        })
    }

    fn content_from(&self, draft: ArticleDraft) -> Result<ArticleContent, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }
        if draft.body.trim().is_empty() {
            return Err(DomainError::Validation("Body is required".to_string()));
        }

        let tags = draft.tags();
        let read_time = self.read_time.estimate(&draft.body);

        Ok(ArticleContent {
            title: draft.title,
            thumbnail: draft.thumbnail,
            body: draft.body,
            tags,
            read_time,
        })
    }

    async fn load_author(&self, author_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("author {} does not exist", author_id)))
    }
}
