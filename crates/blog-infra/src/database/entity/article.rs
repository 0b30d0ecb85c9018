//! Article entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub thumbnail: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::reaction::Entity")]
    Reaction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain article with its engagement projections.
    pub fn into_domain(
        self,
        likes: Vec<Uuid>,
        dislikes: Vec<Uuid>,
        comments: Vec<Uuid>,
    ) -> blog_core::domain::Article {
        blog_core::domain::Article {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            thumbnail: self.thumbnail,
            body: self.body,
            tags: self.tags,
            read_time: self.read_time,
            likes,
            dislikes,
            comments,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

/// Conversion from Domain Article to SeaORM ActiveModel.
/// The engagement projections live in their own tables and are dropped here.
impl From<blog_core::domain::Article> for ActiveModel {
    fn from(article: blog_core::domain::Article) -> Self {
        Self {
            id: Set(article.id),
            author_id: Set(article.author_id),
            title: Set(article.title),
            thumbnail: Set(article.thumbnail),
            body: Set(article.body),
            tags: Set(article.tags),
            read_time: Set(article.read_time),
            created_at: Set(article.created_at.into()),
            updated_at: Set(article.updated_at.into()),
        }
    }
}
