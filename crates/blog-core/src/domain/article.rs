use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PublicUser;

/// Article entity - a published blog post.
///
/// `likes`, `dislikes` and `comments` are read-only projections filled in by
/// the repository; edits never touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub body: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub likes: Vec<Uuid>,
    pub dislikes: Vec<Uuid>,
    pub comments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article with no engagement yet.
    pub fn new(author_id: Uuid, content: ArticleContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: content.title,
            thumbnail: content.thumbnail,
            body: content.body,
            tags: content.tags,
            read_time: content.read_time,
            likes: Vec::new(),
            dislikes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields.
    pub fn apply(&mut self, content: ArticleContent, at: DateTime<Utc>) {
        self.title = content.title;
        self.thumbnail = content.thumbnail;
        self.body = content.body;
        self.tags = content.tags;
        self.read_time = content.read_time;
        self.updated_at = at;
    }
}

/// The author-editable part of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    pub title: String,
    pub thumbnail: String,
    pub body: String,
    pub tags: Vec<String>,
    pub read_time: String,
}

/// Raw article input as submitted by an author.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: String,
    pub thumbnail: String,
    pub body: String,
    /// Comma-separated tag list.
    pub search_tags: String,
}

impl ArticleDraft {
    /// Split the tag input on commas. Entries are kept verbatim: no trimming,
    /// no dedup, empty entries included.
    pub fn tags(&self) -> Vec<String> {
        self.search_tags.split(',').map(str::to_string).collect()
    }
}

/// An article with its author's public fields attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredArticle {
    pub article: Article,
    pub author: PublicUser,
}
