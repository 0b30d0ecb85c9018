#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use blog_core::domain::{Article, ArticleContent, ArticleDraft, User};
use blog_core::ports::{ArticleRepository, Email, MailError, Mailer, UserRepository};
use blog_infra::InMemoryStore;

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

pub async fn seed_user(store: &InMemoryStore, name: &str) -> User {
    UserRepository::insert(
        store,
        User::new(
            name.to_string(),
            format!("{name}@example.com"),
            "other".to_string(),
            "hash".to_string(),
        ),
    )
    .await
    .unwrap()
}

pub async fn seed_article(
    store: &InMemoryStore,
    author_id: Uuid,
    title: &str,
    created_at: DateTime<Utc>,
) -> Article {
    let mut article = Article::new(
        author_id,
        ArticleContent {
            title: title.to_string(),
            thumbnail: "https://img.example/thumb.png".to_string(),
            body: "body".to_string(),
            tags: vec!["rust".to_string()],
            read_time: "1 min read".to_string(),
        },
    );
    article.created_at = created_at;
    article.updated_at = created_at;
    ArticleRepository::insert(store, article).await.unwrap()
}

pub fn draft(title: &str, body: &str, tags: &str) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        thumbnail: "https://img.example/thumb.png".to_string(),
        body: body.to_string(),
        search_tags: tags.to_string(),
    }
}

/// Mailer that keeps every message instead of sending it.
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<Email>>,
}

impl CapturingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    /// Token at the end of the link `.../{marker}/{token}` in the last email.
    pub fn last_token(&self, marker: &str) -> String {
        let sent = self.sent();
        let html = &sent.last().unwrap().html;
        let start = html.find(marker).unwrap() + marker.len();
        let rest = &html[start..];
        let end = rest.find('"').unwrap();
        rest[..end].to_string()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Mailer whose provider always refuses.
pub struct RejectingMailer;

#[async_trait]
impl Mailer for RejectingMailer {
    async fn send(&self, _email: Email) -> Result<(), MailError> {
        Err(MailError::Rejected {
            status: 401,
            body: "unauthorized".to_string(),
        })
    }
}
