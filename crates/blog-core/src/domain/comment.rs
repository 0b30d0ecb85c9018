use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PublicUser;

/// Comment entity - a reader's note on an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(article_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            article_id,
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}

/// A comment with its author's public fields attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredComment {
    pub comment: Comment,
    pub author: PublicUser,
}
