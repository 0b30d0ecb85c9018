use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_articles::Articles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reactions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Reactions::ArticleId).uuid().not_null())
                    .col(ColumnDef::new(Reactions::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Reactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // One reaction per user and article.
                    .primary_key(
                        Index::create()
                            .col(Reactions::UserId)
                            .col(Reactions::ArticleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reactions_article")
                            .from(Reactions::Table, Reactions::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reactions_user")
                            .from(Reactions::Table, Reactions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reactions_article_id")
                    .table(Reactions::Table)
                    .col(Reactions::ArticleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reactions {
    Table,
    UserId,
    ArticleId,
    Kind,
    UpdatedAt,
}
