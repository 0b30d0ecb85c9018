//! SeaORM entities.

pub mod article;
pub mod comment;
pub mod follow;
pub mod reaction;
pub mod user;
