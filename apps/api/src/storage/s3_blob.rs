use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::operation::get_object::GetObjectError;
use bytes::Bytes;
use tracing::debug;

use crate::config::Config;
use crate::storage::{BlobStore, StoreError};

/// Blob store backed by a single S3 (or MinIO) bucket. Blob paths are object keys.
#[derive(Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds a client configured for MinIO (local) or AWS (production).
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "review-api-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.s3_endpoint)
            .load()
            .await;

        Self::new(aws_sdk_s3::Client::new(&s3_config), &config.s3_bucket)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn read(&self, path: &str) -> Result<Option<Bytes>, StoreError> {
        let key = path.trim_start_matches('/');
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) if matches!(e.as_service_error(), Some(GetObjectError::NoSuchKey(_))) => {
                debug!("No object at s3://{}/{}", self.bucket, key);
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Blob(format!(
                    "S3 read of s3://{}/{} failed: {e}",
                    self.bucket, key
                )))
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Blob(format!("S3 body read failed: {e}")))?;

        Ok(Some(body.into_bytes()))
    }
}
