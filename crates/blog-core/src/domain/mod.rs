//! Domain entities - the core business objects.

mod article;
mod comment;
mod reaction;
mod user;

pub use article::{Article, ArticleContent, ArticleDraft, AuthoredArticle};
pub use comment::{AuthoredComment, Comment};
pub use reaction::Reaction;
pub use user::{PendingAccount, PublicUser, User};
