//! Article handlers: feed, listing, mutation and image uploads.

use std::path::PathBuf;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::ArticleDraft;
use blog_core::feed::parse_page;
use blog_shared::dto::{
    ArticleRequest, CreatedArticleResponse, DeletedArticleResponse, EditArticleRequest,
    EditedArticleResponse, FeedResponse, PostImageResponse,
};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn not_author() -> AppError {
    AppError::from(DomainError::NotAuthor("article"))
}

fn draft(req: ArticleRequest) -> ArticleDraft {
    ArticleDraft {
        title: req.title,
        thumbnail: req.article_thumbnail,
        body: req.body,
        search_tags: req.search_tags,
    }
}

/// GET /articles/{filter}/{pageNo}
pub async fn home_feed(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (filter, page_no) = path.into_inner();
    let requested = parse_page(Some(page_no.as_str()));

    let page = state.feed.home_feed(&filter, requested, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        home_articles: page.articles.into_iter().map(views::article).collect(),
        total_page: page.total_pages,
        current_page: page.current_page,
    }))
}

/// GET /articles
pub async fn all_articles(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let articles = state.feed.all_articles().await?;
    let body: Vec<_> = articles.into_iter().map(views::article).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /article
pub async fn create_article(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ArticleRequest>,
) -> AppResult<HttpResponse> {
    let published = state
        .articles
        .create(identity.user_id, draft(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(CreatedArticleResponse {
        created_article: views::article(published.article),
        updated_user: views::user(published.author),
        success: "Article Successfully Posted".to_string(),
    }))
}

/// PUT /article
pub async fn edit_article(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<EditArticleRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let article_id = req.article_id.ok_or_else(not_author)?;

    let updated = state
        .articles
        .edit(identity.user_id, article_id, draft(req.article))
        .await?;

    Ok(HttpResponse::Ok().json(EditedArticleResponse {
        updated_article: views::article(updated),
        success: "Article Successfully Edited".to_string(),
    }))
}

/// DELETE /article/{postId}
pub async fn delete_article(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let article_id = Uuid::parse_str(&path).map_err(|_| not_author())?;

    let removed = state.articles.delete(identity.user_id, article_id).await?;

    Ok(HttpResponse::Ok().json(DeletedArticleResponse {
        deleted_article: views::bare_article(removed.article),
        updated_user: views::user(removed.author),
        success: "Article Successfully Deleted".to_string(),
    }))
}

/// POST /article/upload/image
pub async fn upload_image(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let image = upload(&state, body).await?;
    Ok(HttpResponse::Ok().json(PostImageResponse {
        post_img_url: views::image(image),
    }))
}

/// POST /article/upload/thumbnail
pub async fn upload_thumbnail(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let image = upload(&state, body).await?;
    Ok(HttpResponse::Ok().json(views::image(image)))
}

/// Spool the request body to a temporary file and hand it to the image host.
async fn upload(
    state: &AppState,
    body: web::Bytes,
) -> AppResult<blog_core::ports::UploadedImage> {
    if body.is_empty() {
        return Err(AppError::BadRequest("No image provided".to_string()));
    }
    let images = state
        .images
        .as_ref()
        .ok_or_else(|| AppError::Internal("image hosting is not configured".to_string()))?;

    let path: PathBuf = std::env::temp_dir().join(format!("blog-upload-{}", Uuid::new_v4()));
    tokio::fs::write(&path, &body)
        .await
        .map_err(|e| AppError::Internal(format!("failed to spool upload: {}", e)))?;

    let result = images.upload(&path).await;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!(error = %e, "Failed to remove spooled upload");
    }

    Ok(result.map_err(DomainError::from)?)
}
