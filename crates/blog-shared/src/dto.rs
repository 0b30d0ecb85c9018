//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to start a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub gender: String,
    pub password: String,
}

/// Activation or password reset link payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token: Option<String>,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetNewPasswordRequest {
    pub token: Option<String>,
    pub password: String,
}

/// Body of `POST /article`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    pub title: String,
    #[serde(default)]
    pub article_thumbnail: String,
    pub body: String,
    #[serde(default)]
    pub search_tags: String,
}

/// Body of `PUT /article`: the article fields plus the article to edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditArticleRequest {
    pub article_id: Option<Uuid>,
    #[serde(flatten)]
    pub article: ArticleRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

/// A user as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub gender: String,
    pub posts: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author fields attached to articles and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
    pub profile_pic: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// An article. `A` is the author representation: the public author fields
/// for populated articles, or just the author id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse<A = AuthorResponse> {
    pub id: Uuid,
    pub title: String,
    pub article_thumbnail: String,
    pub body: String,
    pub author: A,
    pub tags: Vec<String>,
    pub read_time: String,
    pub likes: Vec<Uuid>,
    pub dislikes: Vec<Uuid>,
    pub comments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the home feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub home_articles: Vec<ArticleResponse>,
    pub total_page: u64,
    pub current_page: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedArticleResponse {
    pub created_article: ArticleResponse,
    pub updated_user: UserResponse,
    pub success: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditedArticleResponse {
    pub updated_article: ArticleResponse,
    pub success: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedArticleResponse {
    pub deleted_article: ArticleResponse<Uuid>,
    pub updated_user: UserResponse,
    pub success: String,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub correct_user: UserResponse,
    pub token: String,
    pub success: String,
}

/// An uploaded image as reported by the image host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub url: String,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostImageResponse {
    pub post_img_url: ImageResponse,
}

/// A comment. `A` follows the same convention as [`ArticleResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse<A = AuthorResponse> {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author: A,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentedArticleResponse {
    pub updated_article: ArticleResponse,
    pub comment: CommentResponse,
    pub success: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCommentResponse {
    pub deleted_comment: CommentResponse<Uuid>,
    pub success: String,
}

/// A user's public profile with its follow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
}
