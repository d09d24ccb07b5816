// ABOUTME: Object-storage operations trait.
// ABOUTME: Bucket lookups, prefix listing, and object deletion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage-side operations: buckets and the objects inside them.
#[async_trait]
pub trait StorageOps: Send + Sync {
    /// Whether the named bucket exists and is reachable.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError>;

    /// All buckets owned by the account.
    async fn buckets(&self) -> Result<Vec<BucketRecord>, StorageError>;

    /// Objects in a bucket, optionally narrowed to a key prefix.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<StorageObject>, StorageError>;

    /// Delete a single object.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}

/// Snapshot of a bucket.
#[derive(Debug, Clone)]
pub struct BucketRecord {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
}

/// Snapshot of a stored object.
#[derive(Debug, Clone)]
pub struct StorageObject {
    pub key: String,
    pub size: Option<i64>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("throttled by the provider: {0}")]
    Throttled(String),

    #[error("storage api error: {0}")]
    Remote(String),
}
