//! External asset host client.
//!
//! Product images are never stored locally: the uploaded file is forwarded
//! to the configured asset host, and the catalog records the URL the host
//! answers with.

use serde::Deserialize;
use thiserror::Error;

use crate::config::AssetConfig;

/// Errors from the asset host.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Request-level failure (connection, timeout, malformed response).
    #[error("asset host request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("asset host answered {0}")]
    UploadFailed(reqwest::StatusCode),
}

/// Expected response from the upload endpoint.
#[derive(Deserialize)]
struct UploadResponse {
    /// Publicly reachable URL of the stored asset.
    url: String,
}

/// Thin client for the asset host's multipart upload endpoint.
#[derive(Clone)]
pub struct AssetHost {
    client: reqwest::Client,
    upload_url: String,
}

impl AssetHost {
    /// Create a client for the configured upload endpoint.
    #[must_use]
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: config.upload_url.clone(),
        }
    }

    /// Upload an image and return its hosted URL.
    ///
    /// # Errors
    ///
    /// Returns `AssetError` if the upload request fails or the host
    /// rejects it.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AssetError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::UploadFailed(status));
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.url)
    }
}
