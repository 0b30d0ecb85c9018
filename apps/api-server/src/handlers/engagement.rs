//! Comment, reaction, follow and profile handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_shared::dto::{CommentRequest, CommentedArticleResponse, DeletedCommentResponse};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn article_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Article not found".to_string()))
}

fn user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("User not found.".to_string()))
}

/// POST /comment/{postId}
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let article_id = article_id(&path)?;

    let (article, comment) = state
        .engagement
        .add_comment(article_id, identity.user_id, body.into_inner().comment)
        .await?;

    Ok(HttpResponse::Ok().json(CommentedArticleResponse {
        updated_article: views::article(article),
        comment: views::comment(comment),
        success: "Comment Successfully Posted".to_string(),
    }))
}

/// GET /comments/{postId}
pub async fn comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let comments = state.engagement.comments(article_id(&path)?).await?;
    let body: Vec<_> = comments.into_iter().map(views::comment).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /comment/{commentId}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let comment_id = Uuid::parse_str(&path).map_err(|_| {
        AppError::from(blog_core::DomainError::NotAuthor("comment"))
    })?;

    let deleted = state
        .engagement
        .delete_comment(comment_id, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(DeletedCommentResponse {
        deleted_comment: views::bare_comment(deleted),
        success: "Comment Successfully Deleted".to_string(),
    }))
}

/// PUT /like/{postId}
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let article = state
        .engagement
        .like(article_id(&path)?, identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(views::article(article)))
}

/// PUT /dislike/{postId}
pub async fn dislike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let article = state
        .engagement
        .dislike(article_id(&path)?, identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(views::article(article)))
}

/// PUT /follow/{userId}
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let profile = state
        .engagement
        .follow(identity.user_id, user_id(&path)?)
        .await?;
    Ok(HttpResponse::Ok().json(views::profile(profile)))
}

/// PUT /unfollow/{userId}
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let profile = state
        .engagement
        .unfollow(identity.user_id, user_id(&path)?)
        .await?;
    Ok(HttpResponse::Ok().json(views::profile(profile)))
}

/// GET /user/profile/{userId}
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let profile = state.engagement.profile(user_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(views::profile(profile)))
}
