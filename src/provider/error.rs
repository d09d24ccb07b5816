// ABOUTME: Unified provider error with SNAFU pattern.
// ABOUTME: Wraps compute and storage failures for programmatic handling.

use snafu::Snafu;

use super::traits::{ComputeError, StorageError};

/// Unified error for failures on either side of the provider API.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    #[snafu(display("compute api call failed: {source}"))]
    Compute { source: ComputeError },

    #[snafu(display("storage api call failed: {source}"))]
    Storage { source: StorageError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The named resource does not exist remotely.
    NotFound,
    /// Credentials were rejected by the remote endpoint.
    AuthenticationFailed,
    /// The provider asked us to slow down.
    Throttled,
    /// Any other remote failure.
    Remote,
}

impl ProviderError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::Compute { source } => match source {
                ComputeError::NotFound(_) => ProviderErrorKind::NotFound,
                ComputeError::AuthenticationFailed(_) => ProviderErrorKind::AuthenticationFailed,
                ComputeError::Throttled(_) => ProviderErrorKind::Throttled,
                ComputeError::InvalidRequest(_) | ComputeError::Remote(_) => {
                    ProviderErrorKind::Remote
                }
            },
            ProviderError::Storage { source } => match source {
                StorageError::BucketNotFound(_) | StorageError::ObjectNotFound(_) => {
                    ProviderErrorKind::NotFound
                }
                StorageError::AuthenticationFailed(_) => ProviderErrorKind::AuthenticationFailed,
                StorageError::Throttled(_) => ProviderErrorKind::Throttled,
                StorageError::Remote(_) => ProviderErrorKind::Remote,
            },
        }
    }
}

impl From<ComputeError> for ProviderError {
    fn from(source: ComputeError) -> Self {
        ProviderError::Compute { source }
    }
}

impl From<StorageError> for ProviderError {
    fn from(source: StorageError) -> Self {
        ProviderError::Storage { source }
    }
}
