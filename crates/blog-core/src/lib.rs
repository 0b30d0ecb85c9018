//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Entities, ports, the home-feed engine and the services built on top of them.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod feed;
pub mod ports;
pub mod services;

pub use error::DomainError;
