//! Image hosting port.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Public URL of the hosted image.
    pub url: String,
    /// Whatever the provider returned about the asset.
    pub metadata: serde_json::Value,
}

/// Image store trait - abstraction over image hosting (Cloudinary).
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload the file at `path` and return where it is hosted.
    async fn upload(&self, path: &Path) -> Result<UploadedImage, MediaError>;
}

/// Image upload errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to read upload: {0}")]
    Io(String),

    #[error("Upload request failed: {0}")]
    Request(String),

    #[error("Image host rejected upload ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Unexpected image host response: {0}")]
    Response(String),
}
