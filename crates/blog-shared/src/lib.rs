//! # Blog Shared
//!
//! Wire types shared by the API server and its clients.
//! Field names are camelCase to match the web client.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
