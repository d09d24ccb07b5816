// ABOUTME: Application-wide error types for nimbus.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::removal::RemovalError;
use crate::session::SessionError;
use crate::types::ParseImageIdError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid image id: {0}")]
    InvalidImageId(#[from] ParseImageIdError),

    #[error("key pair not found: {0}")]
    KeyPairNotFound(String),

    #[error("availability zone not found: {0}")]
    ZoneNotFound(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Removal(#[from] RemovalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
