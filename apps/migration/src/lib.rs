//! Database schema migrations for the blog.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_articles;
mod m20240101_000003_create_comments;
mod m20240101_000004_create_reactions;
mod m20240101_000005_create_follows;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_articles::Migration),
            Box::new(m20240101_000003_create_comments::Migration),
            Box::new(m20240101_000004_create_reactions::Migration),
            Box::new(m20240101_000005_create_follows::Migration),
        ]
    }
}
