//! Domain values to wire DTOs.

use uuid::Uuid;

use blog_core::domain::{Article, AuthoredArticle, AuthoredComment, Comment, PublicUser, User};
use blog_core::ports::UploadedImage;
use blog_core::services::Profile;
use blog_shared::dto::{
    ArticleResponse, AuthorResponse, CommentResponse, ImageResponse, ProfileResponse,
    UserResponse,
};

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        profile_pic: user.profile_pic,
        gender: user.gender,
        posts: user.posts,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn author(author: PublicUser) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        username: author.username,
        profile_pic: author.profile_pic,
        email: author.email,
        created_at: author.created_at,
    }
}

fn article_with<A>(article: Article, author: A) -> ArticleResponse<A> {
    ArticleResponse {
        id: article.id,
        title: article.title,
        article_thumbnail: article.thumbnail,
        body: article.body,
        author,
        tags: article.tags,
        read_time: article.read_time,
        likes: article.likes,
        dislikes: article.dislikes,
        comments: article.comments,
        created_at: article.created_at,
        updated_at: article.updated_at,
    }
}

pub fn article(authored: AuthoredArticle) -> ArticleResponse {
    article_with(authored.article, author(authored.author))
}

/// An article without its author populated.
pub fn bare_article(article: Article) -> ArticleResponse<Uuid> {
    let author_id = article.author_id;
    article_with(article, author_id)
}

pub fn comment(authored: AuthoredComment) -> CommentResponse {
    let AuthoredComment { comment, author: by } = authored;
    CommentResponse {
        id: comment.id,
        article_id: comment.article_id,
        author: author(by),
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn bare_comment(comment: Comment) -> CommentResponse<Uuid> {
    CommentResponse {
        id: comment.id,
        article_id: comment.article_id,
        author: comment.author_id,
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn profile(profile: Profile) -> ProfileResponse {
    ProfileResponse {
        user: user(profile.user),
        followers: profile.followers,
        following: profile.following,
    }
}

pub fn image(image: UploadedImage) -> ImageResponse {
    ImageResponse {
        url: image.url,
        metadata: image.metadata,
    }
}
