use std::collections::BTreeMap;

use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use blog_core::domain::{ArticleContent, Reaction};
use blog_core::error::RepoError;
use blog_core::feed::{SortOrder, Window};
use blog_core::ports::{
    ArticleRepository, CommentRepository, ReactionRepository, UserRepository,
};

use crate::database::entity::{article, comment, reaction, user};
use crate::database::postgres_repo::{
    PostgresArticleRepository, PostgresCommentRepository, PostgresReactionRepository,
    PostgresUserRepository,
};

fn article_row(id: Uuid, author_id: Uuid) -> article::Model {
    let now = Utc::now();
    article::Model {
        id,
        author_id,
        title: "Test Article".to_owned(),
        thumbnail: "https://img.example/t.png".to_owned(),
        body: "Content".to_owned(),
        tags: vec!["rust".to_owned(), " web".to_owned()],
        read_time: "1 min read".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn no_rows() -> Vec<BTreeMap<String, Value>> {
    Vec::new()
}

#[tokio::test]
async fn test_find_article_by_id_hydrates_engagement() {
    let article_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let fan = Uuid::new_v4();
    let critic = Uuid::new_v4();
    let comment_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![article_row(article_id, author_id)]])
        .append_query_results([vec![
            reaction::Model {
                user_id: fan,
                article_id,
                kind: "liked".to_owned(),
                updated_at: now.into(),
            },
            reaction::Model {
                user_id: critic,
                article_id,
                kind: "disliked".to_owned(),
                updated_at: now.into(),
            },
        ]])
        .append_query_results([vec![comment::Model {
            id: comment_id,
            article_id,
            author_id: fan,
            text: "Nice".to_owned(),
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);

    let article = ArticleRepository::find_by_id(&repo, article_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(article.title, "Test Article");
    assert_eq!(article.author_id, author_id);
    assert_eq!(article.tags, vec!["rust", " web"]);
    assert_eq!(article.likes, vec![fan]);
    assert_eq!(article.dislikes, vec![critic]);
    assert_eq!(article.comments, vec![comment_id]);
}

#[tokio::test]
async fn test_find_missing_article() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<article::Model>::new()])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);

    let result = ArticleRepository::find_by_id(&repo, Uuid::new_v4())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_in_window_empty_slice_skips_hydration() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<article::Model>::new()])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);

    let result = repo
        .find_in_window(
            Window::Since(Utc::now() - TimeDelta::days(7)),
            SortOrder::Descending,
            3,
            3,
        )
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_find_in_window_beyond_bigint_offset_is_empty() {
    // No query results queued: reaching the database would be an error.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let repo = PostgresArticleRepository::new(db);

    let result = repo
        .find_in_window(Window::Unbounded, SortOrder::Ascending, u64::MAX, 3)
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_update_owned_by_someone_else_changes_nothing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresArticleRepository::new(db);

    let result = repo
        .update_owned(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ArticleContent {
                title: "New".to_owned(),
                thumbnail: String::new(),
                body: "Body".to_owned(),
                tags: vec![],
                read_time: "1 min read".to_owned(),
            },
            Utc::now(),
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_user_by_email_without_posts() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: user_id,
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            profile_pic: None,
            gender: "female".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .append_query_results([no_rows()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "alice");
    assert!(user.posts.is_empty());
}

#[tokio::test]
async fn test_update_password_for_unknown_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    assert!(!repo.update_password("ghost@example.com", "hash").await.unwrap());
}

#[tokio::test]
async fn test_missing_reaction_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<reaction::Model>::new()])
        .into_connection();

    let repo = PostgresReactionRepository::new(db);

    let reaction = repo.get(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();

    assert_eq!(reaction, Reaction::None);
}

#[tokio::test]
async fn test_delete_missing_comment() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let result = repo.delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}
