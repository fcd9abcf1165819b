//! S3-compatible object storage client for the upload endpoint.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;

use crate::config::S3Config;

/// Errors produced by the upload path.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file provided")]
    EmptyBody,
    #[error(
        "object storage is not configured: set S3_BUCKET (or S3_BUCKET_ID), \
         S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY"
    )]
    Unconfigured,
    #[error("failed to upload object: {0}")]
    Failed(String),
}

/// Maps an [`UploadError`] to an HTTP status code.
pub fn upload_error_to_status_code(error: &UploadError) -> u16 {
    match error {
        UploadError::EmptyBody => 400,
        UploadError::Unconfigured => 500,
        UploadError::Failed(_) => 500,
    }
}

/// A configured bucket plus the client to talk to it.
///
/// Constructed once at startup; the upload handler makes one `PutObject`
/// call per request with no retry or backoff of its own.
pub struct ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint: Option<String>,
    region: String,
}

impl ObjectStore {
    pub async fn new(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "environment",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "object storage client configured"
        );

        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.clone(),
            region: config.region.clone(),
        }
    }

    /// Uploads one object under the given key.
    pub async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), UploadError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| UploadError::Failed(e.to_string()))?;

        Ok(())
    }

    /// Builds the public URL for an uploaded key.
    ///
    /// Path-style against a custom endpoint, virtual-hosted AWS format
    /// otherwise.
    pub fn public_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            }
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store(endpoint: Option<&str>) -> ObjectStore {
        ObjectStore::new(&S3Config {
            endpoint: endpoint.map(String::from),
            region: "us-east-1".to_string(),
            bucket: "media".to_string(),
            access_key_id: "key".to_string(),
            secret_access_key: "secret".to_string(),
        })
        .await
    }

    #[tokio::test]
    async fn test_public_url_with_custom_endpoint() {
        let store = store(Some("https://s3.example.com/")).await;
        assert_eq!(
            store.public_url("uploads/abc.png"),
            "https://s3.example.com/media/uploads/abc.png"
        );
    }

    #[tokio::test]
    async fn test_public_url_without_endpoint_uses_aws_format() {
        let store = store(None).await;
        assert_eq!(
            store.public_url("uploads/abc.png"),
            "https://media.s3.us-east-1.amazonaws.com/uploads/abc.png"
        );
    }

    #[test]
    fn test_upload_error_status_codes() {
        assert_eq!(upload_error_to_status_code(&UploadError::EmptyBody), 400);
        assert_eq!(upload_error_to_status_code(&UploadError::Unconfigured), 500);
        assert_eq!(
            upload_error_to_status_code(&UploadError::Failed("timeout".to_string())),
            500
        );
    }
}
