mod common;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::services::EngagementService;
use blog_infra::InMemoryStore;

use common::{seed_article, seed_user, store};

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
async fn test_like_toggles_and_replaces_dislike() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let reader = seed_user(&store, "bob").await;
    let article = seed_article(&store, author.id, "one", Utc::now()).await;
    let service = engagement(&store);

    let liked = service.like(article.id, reader.id).await.unwrap();
    assert_eq!(liked.article.likes, vec![reader.id]);
    assert!(liked.article.dislikes.is_empty());

    let disliked = service.dislike(article.id, reader.id).await.unwrap();
    assert!(disliked.article.likes.is_empty());
    assert_eq!(disliked.article.dislikes, vec![reader.id]);

    let cleared = service.dislike(article.id, reader.id).await.unwrap();
    assert!(cleared.article.likes.is_empty());
    assert!(cleared.article.dislikes.is_empty());
}

#[tokio::test]
async fn test_react_to_missing_article() {
    let store = store();
    let reader = seed_user(&store, "bob").await;

    let result = engagement(&store).like(Uuid::new_v4(), reader.id).await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_comments_are_listed_with_authors() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let reader = seed_user(&store, "bob").await;
    let article = seed_article(&store, author.id, "one", Utc::now()).await;
    let service = engagement(&store);

    let (updated, first) = service
        .add_comment(article.id, reader.id, "First!".to_string())
        .await
        .unwrap();
    service
        .add_comment(article.id, author.id, "Thanks".to_string())
        .await
        .unwrap();

    assert_eq!(updated.article.comments, vec![first.comment.id]);
    assert_eq!(first.author.username, "bob");

    let listed = service.comments(article.id).await.unwrap();
    let texts: Vec<(&str, &str)> = listed
        .iter()
        .map(|c| (c.comment.text.as_str(), c.author.username.as_str()))
        .collect();
    assert_eq!(texts, vec![("First!", "bob"), ("Thanks", "ada")]);
}

#[tokio::test]
async fn test_empty_comment_is_rejected() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let article = seed_article(&store, author.id, "one", Utc::now()).await;

    let result = engagement(&store)
        .add_comment(article.id, author.id, "   ".to_string())
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_only_the_comment_author_can_delete_it() {
    let store = store();
    let author = seed_user(&store, "ada").await;
    let reader = seed_user(&store, "bob").await;
    let article = seed_article(&store, author.id, "one", Utc::now()).await;
    let service = engagement(&store);
    let (_, comment) = service
        .add_comment(article.id, reader.id, "Hi".to_string())
        .await
        .unwrap();

    let by_article_author = service.delete_comment(comment.comment.id, author.id).await;
    assert!(matches!(
        by_article_author,
        Err(DomainError::NotAuthor("comment"))
    ));

    let deleted = service
        .delete_comment(comment.comment.id, reader.id)
        .await
        .unwrap();
    assert_eq!(deleted.text, "Hi");
    assert!(service.comments(article.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_follow_and_unfollow() {
    let store = store();
    let ada = seed_user(&store, "ada").await;
    let bob = seed_user(&store, "bob").await;
    let service = engagement(&store);

    let profile = service.follow(bob.id, ada.id).await.unwrap();
    assert_eq!(profile.user.id, ada.id);
    assert_eq!(profile.followers, vec![bob.id]);

    let again = service.follow(bob.id, ada.id).await.unwrap();
    assert_eq!(again.followers, vec![bob.id]);

    let bobs = service.profile(bob.id).await.unwrap();
    assert_eq!(bobs.following, vec![ada.id]);

    let after = service.unfollow(bob.id, ada.id).await.unwrap();
    assert!(after.followers.is_empty());
}

#[tokio::test]
async fn test_cannot_follow_self_or_ghost() {
    let store = store();
    let ada = seed_user(&store, "ada").await;
    let service = engagement(&store);

    let own = service.follow(ada.id, ada.id).await;
    let ghost = service.follow(ada.id, Uuid::new_v4()).await;

    assert!(matches!(own, Err(DomainError::Validation(_))));
    assert!(matches!(ghost, Err(DomainError::NotFound(_))));
}
