// ABOUTME: Manifest location parsing for machine images.
// ABOUTME: Derives the storage bucket and backing-file prefix from bucket/path.manifest.xml.

use std::fmt;
use thiserror::Error;

/// Suffix that closes every image manifest key.
pub const MANIFEST_SUFFIX: &str = ".manifest.xml";

#[derive(Debug, Error)]
pub enum ParseManifestError {
    #[error("manifest location cannot be empty")]
    Empty,

    #[error("manifest location has no bucket component: {0}")]
    MissingBucket(String),

    #[error("manifest location does not end in '.manifest.xml': {0}")]
    MissingSuffix(String),

    #[error("manifest location has an empty object path: {0}")]
    EmptyPath(String),
}

/// A parsed image storage location of the form `bucket/path.manifest.xml`.
///
/// The bucket is the text before the first `/`; the backing-file prefix is
/// the basename of the manifest key with the suffix stripped. That prefix
/// is the sole criterion for which storage objects belong to the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    bucket: String,
    key: String,
}

impl ManifestLocation {
    pub fn parse(input: &str) -> Result<Self, ParseManifestError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseManifestError::Empty);
        }

        let (bucket, key) = match input.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() => (bucket, key),
            _ => return Err(ParseManifestError::MissingBucket(input.to_string())),
        };

        if !key.ends_with(MANIFEST_SUFFIX) {
            return Err(ParseManifestError::MissingSuffix(input.to_string()));
        }

        // An empty basename would make the file prefix match every object
        // in the bucket, so reject it outright.
        let stem = &key[..key.len() - MANIFEST_SUFFIX.len()];
        if stem.rsplit('/').next().unwrap_or("").is_empty() {
            return Err(ParseManifestError::EmptyPath(input.to_string()));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// The storage bucket holding the manifest and its backing files.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Full key of the manifest object within the bucket.
    pub fn manifest_key(&self) -> &str {
        &self.key
    }

    /// Key prefix shared by the image's backing files: the basename of the
    /// manifest key with the `.manifest.xml` suffix stripped.
    pub fn file_prefix(&self) -> &str {
        let stem = &self.key[..self.key.len() - MANIFEST_SUFFIX.len()];
        match stem.rsplit_once('/') {
            Some((_, basename)) => basename,
            None => stem,
        }
    }
}

impl fmt::Display for ManifestLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}
