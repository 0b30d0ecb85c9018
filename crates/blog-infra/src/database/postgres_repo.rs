//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Article, ArticleContent, Comment, Reaction, User};
use blog_core::error::RepoError;
use blog_core::feed::{SortOrder, Window};
use blog_core::ports::{
    ArticleRepository, CommentRepository, FollowRepository, ReactionRepository, UserRepository,
};

use super::entity::article::{self, Entity as ArticleEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::reaction::{self, Entity as ReactionEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL article repository.
pub type PostgresArticleRepository = PostgresBaseRepository<ArticleEntity>;

pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

pub type PostgresReactionRepository = PostgresBaseRepository<ReactionEntity>;

pub type PostgresFollowRepository = PostgresBaseRepository<FollowEntity>;

fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.len() > 1 => format!("{}***", first),
                _ => "***".to_string(),
            };
            format!("{}{}", masked_local, domain)
        }
        None => "***".to_string(),
    }
}

/// Attach the authored article ids to each user row.
async fn hydrate_users<C>(conn: &C, models: Vec<user::Model>) -> Result<Vec<User>, RepoError>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let rows: Vec<(Uuid, Uuid)> = ArticleEntity::find()
        .select_only()
        .column(article::Column::AuthorId)
        .column(article::Column::Id)
        .filter(article::Column::AuthorId.is_in(ids))
        .order_by_asc(article::Column::CreatedAt)
        .order_by_asc(article::Column::Id)
        .into_tuple()
        .all(conn)
        .await
        .map_err(query_err)?;

    let mut posts: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (author_id, article_id) in rows {
        posts.entry(author_id).or_default().push(article_id);
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let owned = posts.remove(&m.id).unwrap_or_default();
            m.into_domain(owned)
        })
        .collect())
}

/// Attach likes, dislikes and comment ids to each article row.
async fn hydrate_articles<C>(
    conn: &C,
    models: Vec<article::Model>,
) -> Result<Vec<Article>, RepoError>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let reactions = ReactionEntity::find()
        .filter(reaction::Column::ArticleId.is_in(ids.clone()))
        .order_by_asc(reaction::Column::UpdatedAt)
        .all(conn)
        .await
        .map_err(query_err)?;
    let comments = CommentEntity::find()
        .filter(comment::Column::ArticleId.is_in(ids))
        .order_by_asc(comment::Column::CreatedAt)
        .order_by_asc(comment::Column::Id)
        .all(conn)
        .await
        .map_err(query_err)?;

    let mut likes: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    let mut dislikes: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in reactions {
        match Reaction::from_stored(&row.kind) {
            Reaction::Liked => likes.entry(row.article_id).or_default().push(row.user_id),
            Reaction::Disliked => dislikes.entry(row.article_id).or_default().push(row.user_id),
            Reaction::None => {}
        }
    }

    let mut comment_ids: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in comments {
        comment_ids.entry(row.article_id).or_default().push(row.id);
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let id = m.id;
            m.into_domain(
                likes.remove(&id).unwrap_or_default(),
                dislikes.remove(&id).unwrap_or_default(),
                comment_ids.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let Some(model) = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        Ok(hydrate_users(&self.db, vec![model]).await?.pop())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let Some(model) = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        Ok(hydrate_users(&self.db, vec![model]).await?.pop())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        hydrate_users(&self.db, models).await
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        hydrate_users(&self.db, models).await
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(|e| match query_err(e) {
                RepoError::Constraint(_) => {
                    RepoError::Constraint("Email already registered".to_string())
                }
                other => other,
            })?;

        Ok(model.into_domain(Vec::new()))
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, RepoError> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(user::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected > 0)
    }
}

fn windowed(window: Window) -> Select<ArticleEntity> {
    let query = ArticleEntity::find();
    match window.cutoff() {
        Some(cutoff) => query.filter(article::Column::CreatedAt.gte(cutoff.fixed_offset())),
        None => query,
    }
}

const MAX_OFFSET: u64 = i64::MAX as u64;

fn sorted(query: Select<ArticleEntity>, order: SortOrder) -> Select<ArticleEntity> {
    match order {
        SortOrder::Ascending => query
            .order_by_asc(article::Column::CreatedAt)
            .order_by_asc(article::Column::Id),
        SortOrder::Descending => query
            .order_by_desc(article::Column::CreatedAt)
            .order_by_desc(article::Column::Id),
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn insert(&self, article: Article) -> Result<Article, RepoError> {
        let model = article::ActiveModel::from(article)
            .insert(&self.db)
            .await
            .map_err(query_err)?;

        Ok(model.into_domain(Vec::new(), Vec::new(), Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
        let Some(model) = ArticleEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        Ok(hydrate_articles(&self.db, vec![model]).await?.pop())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        author_id: Uuid,
        content: ArticleContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Article>, RepoError> {
        // Ownership and write are one statement.
        let result = ArticleEntity::update_many()
            .col_expr(article::Column::Title, Expr::value(content.title))
            .col_expr(article::Column::Thumbnail, Expr::value(content.thumbnail))
            .col_expr(article::Column::Body, Expr::value(content.body))
            .col_expr(article::Column::Tags, Expr::value(content.tags))
            .col_expr(article::Column::ReadTime, Expr::value(content.read_time))
            .col_expr(article::Column::UpdatedAt, Expr::value(updated_at.fixed_offset()))
            .filter(article::Column::Id.eq(id))
            .filter(article::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        ArticleRepository::find_by_id(self, id).await
    }

    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> Result<Option<Article>, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let Some(model) = ArticleEntity::find_by_id(id)
            .filter(article::Column::AuthorId.eq(author_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_err)?
        else {
            // Dropping the transaction rolls it back.
            return Ok(None);
        };

        let article = hydrate_articles(&txn, vec![model]).await?.pop();

        // Comments and reactions go with it through ON DELETE CASCADE.
        ArticleEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_err)?;

        txn.commit().await.map_err(query_err)?;
        Ok(article)
    }

    async fn count_in_window(&self, window: Window) -> Result<u64, RepoError> {
        windowed(window).count(&self.db).await.map_err(query_err)
    }

    async fn find_in_window(
        &self,
        window: Window,
        order: SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Article>, RepoError> {
        // OFFSET binds as a signed bigint; anything larger is past every row.
        if offset > MAX_OFFSET {
            return Ok(Vec::new());
        }

        let models = sorted(windowed(window), order)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        hydrate_articles(&self.db, models).await
    }

    async fn list(&self) -> Result<Vec<Article>, RepoError> {
        let models = sorted(ArticleEntity::find(), SortOrder::Ascending)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        hydrate_articles(&self.db, models).await
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(comment)
            .insert(&self.db)
            .await
            .map_err(query_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::ArticleId.eq(article_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.delete_row(id).await
    }
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn get(&self, user_id: Uuid, article_id: Uuid) -> Result<Reaction, RepoError> {
        let result = ReactionEntity::find_by_id((user_id, article_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result
            .map(|row| Reaction::from_stored(&row.kind))
            .unwrap_or_default())
    }

    async fn set(
        &self,
        user_id: Uuid,
        article_id: Uuid,
        reaction: Reaction,
    ) -> Result<(), RepoError> {
        if reaction == Reaction::None {
            ReactionEntity::delete_by_id((user_id, article_id))
                .exec(&self.db)
                .await
                .map_err(query_err)?;
            return Ok(());
        }

        let row = reaction::ActiveModel {
            user_id: Set(user_id),
            article_id: Set(article_id),
            kind: Set(reaction.as_str().to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        ReactionEntity::insert(row)
            .on_conflict(
                OnConflict::columns([reaction::Column::UserId, reaction::Column::ArticleId])
                    .update_columns([reaction::Column::Kind, reaction::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let existing = FollowEntity::find_by_id((follower_id, followed_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        if existing.is_some() {
            return Ok(false);
        }

        let row = follow::ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
            created_at: Set(Utc::now().fixed_offset()),
        };

        match row.insert(&self.db).await {
            Ok(_) => Ok(true),
            // Lost a race with a concurrent follow of the same pair.
            Err(e) => match query_err(e) {
                RepoError::Constraint(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let result = FollowEntity::delete_by_id((follower_id, followed_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn followers(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let rows = FollowEntity::find()
            .filter(follow::Column::FollowedId.eq(user_id))
            .order_by_asc(follow::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(|row| row.follower_id).collect())
    }

    async fn following(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let rows = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .order_by_asc(follow::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(|row| row.followed_id).collect())
    }
}
