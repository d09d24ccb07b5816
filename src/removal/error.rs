// ABOUTME: Error types for the image-removal workflow.
// ABOUTME: Distinguishes lookup failures, corrupt records, and retry exhaustion.

use crate::provider::ProviderError;
use crate::types::ParseManifestError;

/// Errors that abort the removal workflow.
///
/// Per-object deletion failures are not here: they accumulate in the
/// report and never stop the batch.
#[derive(Debug, thiserror::Error)]
pub enum RemovalError {
    /// The image record does not exist; nothing was touched.
    #[error("image not found: {0}")]
    ImageNotFound(String),

    /// The image record carries a location string no bucket and prefix
    /// can be derived from. The record is inconsistent; nothing was touched.
    #[error("image {image} has a corrupt storage location: {source}")]
    CorruptLocation {
        image: String,
        source: ParseManifestError,
    },

    /// The location names a bucket the storage side cannot find.
    #[error("bucket {bucket} backing image {image} not found")]
    BucketNotFound { image: String, bucket: String },

    /// Backing objects survived every delete pass. The image record was
    /// not deregistered.
    #[error("{remaining} backing object(s) still present after {passes} delete pass(es)")]
    DeletionIncomplete { remaining: usize, passes: usize },

    /// A remote call outside the per-object delete loop failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
