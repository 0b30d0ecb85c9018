//! Cloudinary image store.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use sha2::{Digest, Sha256};

use blog_core::ports::{ImageStore, MediaError, UploadedImage};

/// Cloudinary account settings.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Overridable for tests and proxies.
    pub api_base: String,
}

impl CloudinaryConfig {
    /// Load from `CLOUDINARY_*` variables. `None` when the account is not configured.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").ok()?,
            api_key: std::env::var("CLOUDINARY_API_KEY").ok()?,
            api_secret: std::env::var("CLOUDINARY_API_SECRET").ok()?,
            api_base: std::env::var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string()),
        })
    }
}

/// Signed uploads to the Cloudinary image API.
pub struct CloudinaryImageStore {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", self.config.api_base, self.config.cloud_name)
    }

    /// SHA-256 signature over the signed parameters, as Cloudinary expects:
    /// `hex(sha256("timestamp=<ts>" + api_secret))`.
    fn signature(&self, timestamp: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("timestamp={}{}", timestamp, self.config.api_secret));
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn upload(&self, path: &Path) -> Result<UploadedImage, MediaError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let timestamp = Utc::now().timestamp();
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", self.signature(timestamp))
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let metadata: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MediaError::Response(e.to_string()))?;
        let url = metadata
            .get("secure_url")
            .or_else(|| metadata.get("url"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| MediaError::Response("no url in upload response".to_string()))?
            .to_string();

        tracing::debug!(url = %url, "Image uploaded");
        Ok(UploadedImage { url, metadata })
    }
}
