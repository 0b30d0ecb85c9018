mod common;

use std::sync::Arc;

use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::Reaction;
use blog_core::ports::{ArticleRepository, CommentRepository, ReactionRepository, UserRepository};
use blog_core::services::{ArticleService, EngagementService, WordsPerMinute};
use blog_infra::InMemoryStore;

use common::{draft, seed_user, store};

fn articles(store: &Arc<InMemoryStore>) -> ArticleService {
    ArticleService::new(store.clone(), store.clone(), Arc::new(WordsPerMinute::default()))
}

fn engagement(store: &Arc<InMemoryStore>) -> EngagementService {
    EngagementService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

#[tokio::test]
async fn test_create_then_delete_round_trip() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let service = articles(&store);

    let published = service
        .create(author.id, draft("Hello", "some words here", "rust,web"))
        .await
        .unwrap();
    let article_id = published.article.article.id;

    assert_eq!(published.author.posts, vec![article_id]);
    assert_eq!(published.article.author.id, author.id);
    assert_eq!(published.article.article.read_time, "1 min read");
    assert_eq!(published.article.article.tags, vec!["rust", "web"]);

    let removed = service.delete(author.id, article_id).await.unwrap();

    assert_eq!(removed.article.id, article_id);
    assert!(removed.author.posts.is_empty());
    assert!(
        ArticleRepository::find_by_id(store.as_ref(), article_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_delete_by_non_author_changes_nothing() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let intruder = seed_user(&store, "mallory").await;
    let service = articles(&store);
    let published = service
        .create(author.id, draft("Hello", "body", "rust"))
        .await
        .unwrap();
    let article_id = published.article.article.id;

    let result = service.delete(intruder.id, article_id).await;

    assert!(matches!(result, Err(DomainError::NotAuthor("article"))));
    let still_there = ArticleRepository::find_by_id(store.as_ref(), article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still_there.title, "Hello");
    let reloaded = UserRepository::find_by_id(store.as_ref(), author.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.posts, vec![article_id]);
}

#[tokio::test]
async fn test_delete_missing_article_is_an_ownership_error() {
    let store = store();
    let author = seed_user(&store, "ada").await;

    let result = articles(&store).delete(author.id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(DomainError::NotAuthor("article"))));
}

#[tokio::test]
async fn test_delete_cascades_comments_and_reactions() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let reader = seed_user(&store, "bob").await;
    let service = articles(&store);
    let article_id = service
        .create(author.id, draft("Hello", "body", "rust"))
        .await
        .unwrap()
        .article
        .article
        .id;
    let engagement = engagement(&store);
    let (_, comment) = engagement
        .add_comment(article_id, reader.id, "Nice".to_string())
        .await
        .unwrap();
    engagement.like(article_id, reader.id).await.unwrap();

    service.delete(author.id, article_id).await.unwrap();

    assert!(
        CommentRepository::find_by_id(store.as_ref(), comment.comment.id)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(
        store.get(reader.id, article_id).await.unwrap(),
        Reaction::None
    );
}

#[tokio::test]
async fn test_edit_only_touches_content_fields() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let reader = seed_user(&store, "bob").await;
    let service = articles(&store);
    let article_id = service
        .create(author.id, draft("Hello", "body", "rust"))
        .await
        .unwrap()
        .article
        .article
        .id;
    let engagement = engagement(&store);
    engagement.like(article_id, reader.id).await.unwrap();
    engagement.dislike(article_id, author.id).await.unwrap();
    engagement
        .add_comment(article_id, reader.id, "Nice".to_string())
        .await
        .unwrap();
    let before = ArticleRepository::find_by_id(store.as_ref(), article_id)
        .await
        .unwrap()
        .unwrap();

    let long_body = vec!["word"; 450].join(" ");
    let edited = service
        .edit(author.id, article_id, draft("Renamed", &long_body, "a, b"))
        .await
        .unwrap();

    let after = &edited.article;
    assert_eq!(after.title, "Renamed");
    assert_eq!(after.body, long_body);
    assert_eq!(after.tags, vec!["a", " b"]);
    assert_eq!(after.read_time, "3 min read");
    assert_eq!(after.author_id, before.author_id);
    assert_eq!(after.likes, before.likes);
    assert_eq!(after.dislikes, before.dislikes);
    assert_eq!(after.comments, before.comments);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(edited.author.id, author.id);
}

#[tokio::test]
async fn test_edit_by_non_author_is_rejected() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let intruder = seed_user(&store, "mallory").await;
    let service = articles(&store);
    let article_id = service
        .create(author.id, draft("Hello", "body", "rust"))
        .await
        .unwrap()
        .article
        .article
        .id;

    let result = service
        .edit(intruder.id, article_id, draft("Pwned", "body", ""))
        .await;

    assert!(matches!(result, Err(DomainError::NotAuthor("article"))));
    let unchanged = ArticleRepository::find_by_id(store.as_ref(), article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.title, "Hello");
}

#[tokio::test]
async fn test_edit_targets_the_named_article_only() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let service = articles(&store);
    let first = service
        .create(author.id, draft("First", "body", ""))
        .await
        .unwrap()
        .article
        .article
        .id;
    let second = service
        .create(author.id, draft("Second", "body", ""))
        .await
        .unwrap()
        .article
        .article
        .id;

    service
        .edit(author.id, second, draft("Second v2", "body", ""))
        .await
        .unwrap();

    let untouched = ArticleRepository::find_by_id(store.as_ref(), first)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.title, "First");
}

#[tokio::test]
async fn test_create_requires_title_and_body() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let service = articles(&store);

    let no_title = service.create(author.id, draft("  ", "body", "")).await;
    let no_body = service.create(author.id, draft("Title", "", "")).await;

    assert!(matches!(no_title, Err(DomainError::Validation(_))));
    assert!(matches!(no_body, Err(DomainError::Validation(_))));
    assert!(
        ArticleRepository::list(store.as_ref())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_create_for_unknown_author_is_internal() {
    let store = store();

    let result = articles(&store)
        .create(Uuid::new_v4(), draft("Hello", "body", ""))
        .await;

    assert!(matches!(result, Err(DomainError::Internal(_))));
}
