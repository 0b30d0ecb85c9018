//! Feed query engine.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Article, AuthoredArticle, PublicUser};
use crate::error::DomainError;
use crate::ports::{ArticleRepository, UserRepository};

use super::{FeedFilter, HOME_FEED_PAGE_SIZE, paginate};

/// One page of the home feed.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub articles: Vec<AuthoredArticle>,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Builds home-feed pages out of the article and user repositories.
pub struct FeedEngine {
    articles: Arc<dyn ArticleRepository>,
    users: Arc<dyn UserRepository>,
    page_size: NonZeroU64,
}

impl FeedEngine {
    pub fn new(articles: Arc<dyn ArticleRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            articles,
            users,
            page_size: HOME_FEED_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: NonZeroU64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch page `requested_page` of the feed selected by `keyword`.
    ///
    /// Count, fetch and author lookup run one after another; the first
    /// failure aborts the whole request.
    pub async fn home_feed(
        &self,
        keyword: &str,
        requested_page: u64,
        now: DateTime<Utc>,
    ) -> Result<FeedPage, DomainError> {
        let filter = FeedFilter::parse(keyword);
        let window = filter.window(now);

        let total = self.articles.count_in_window(window).await?;
        let order = filter.order();
        let page = paginate(total, self.page_size, requested_page);

        let found = self
            .articles
            .find_in_window(window, order, page.offset, page.limit)
            .await?;
        let articles = attach_authors(self.users.as_ref(), found).await?;

        tracing::debug!(
            filter = filter.as_str(),
            total,
            page = page.current_page,
            total_pages = page.total_pages,
            returned = articles.len(),
            "Home feed page built"
        );

        Ok(FeedPage {
            articles,
            total_pages: page.total_pages,
            current_page: page.current_page,
        })
    }

    /// Every article with its author, unpaginated.
    pub async fn all_articles(&self) -> Result<Vec<AuthoredArticle>, DomainError> {
        let articles = self.articles.list().await?;
        attach_authors(self.users.as_ref(), articles).await
    }
}

/// Attach each article's author's public fields, preserving article order.
///
/// An article whose author cannot be loaded is a data error.
pub async fn attach_authors(
    users: &dyn UserRepository,
    articles: Vec<Article>,
) -> Result<Vec<AuthoredArticle>, DomainError> {
    if articles.is_empty() {
        return Ok(Vec::new());
    }

    let mut author_ids: Vec<Uuid> = articles.iter().map(|a| a.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<Uuid, PublicUser> = users
        .find_many(&author_ids)
        .await?
        .iter()
        .map(|user| (user.id, user.public()))
        .collect();

    articles
        .into_iter()
        .map(|article| {
            let author = authors.get(&article.author_id).cloned().ok_or_else(|| {
                DomainError::Internal(format!(
                    "author {} of article {} is missing",
                    article.author_id, article.id
                ))
            })?;
            Ok(AuthoredArticle { article, author })
        })
        .collect()
}
