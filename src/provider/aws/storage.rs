// ABOUTME: StorageOps implementation over aws-sdk-s3.
// ABOUTME: Bucket checks, paginated prefix listing, and object deletion.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use super::connect::ConnectionSettings;
use crate::provider::traits::{BucketRecord, StorageError, StorageObject, StorageOps};

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn classify_s3(code: Option<&str>, message: Option<&str>, fallback: String) -> StorageError {
    let msg = message.map(str::to_owned).unwrap_or(fallback);
    match code {
        Some("NoSuchBucket") => StorageError::BucketNotFound(msg),
        Some("NoSuchKey") => StorageError::ObjectNotFound(msg),
        Some("AccessDenied") | Some("InvalidAccessKeyId") | Some("SignatureDoesNotMatch")
        | Some("ExpiredToken") => StorageError::AuthenticationFailed(msg),
        Some("SlowDown") => StorageError::Throttled(msg),
        _ => StorageError::Remote(msg),
    }
}

fn to_datetime(value: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

// =============================================================================
// AwsStorage
// =============================================================================

/// Storage API backed by aws-sdk-s3.
///
/// Connects lazily on first use, independently of the compute side.
pub struct AwsStorage {
    settings: ConnectionSettings,
    client: OnceCell<Client>,
}

impl AwsStorage {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            settings,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                tracing::debug!(region = %self.settings.region, "opening storage connection");
                Client::new(&self.settings.sdk_config().await)
            })
            .await
    }
}

#[async_trait]
impl StorageOps for AwsStorage {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        match self.client().await.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_not_found() => Ok(false),
            Err(e) => Err(classify_s3(e.code(), e.message(), e.to_string())),
        }
    }

    async fn buckets(&self) -> Result<Vec<BucketRecord>, StorageError> {
        let out = self
            .client()
            .await
            .list_buckets()
            .send()
            .await
            .map_err(|e| classify_s3(e.code(), e.message(), e.to_string()))?;
        Ok(out
            .buckets()
            .iter()
            .map(|bucket| BucketRecord {
                name: bucket.name().unwrap_or_default().to_string(),
                created: bucket.creation_date().and_then(to_datetime),
            })
            .collect())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<StorageObject>, StorageError> {
        let mut pages = self
            .client()
            .await
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(prefix.map(str::to_owned))
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| classify_s3(e.code(), e.message(), e.to_string()))?;
            for object in page.contents() {
                objects.push(StorageObject {
                    key: object.key().unwrap_or_default().to_string(),
                    size: object.size(),
                    last_modified: object.last_modified().and_then(to_datetime),
                });
            }
        }
        Ok(objects)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.client()
            .await
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_s3(e.code(), e.message(), e.to_string()))?;
        Ok(())
    }
}
