// ABOUTME: Machine-image identifier validation.
// ABOUTME: Enforces the ami- prefix and fixed-length hex suffix before any remote call.

use std::fmt;
use thiserror::Error;

/// Namespace prefix every machine-image identifier carries.
pub const IMAGE_ID_PREFIX: &str = "ami-";

/// Total identifier length: the prefix plus twelve hex characters.
pub const IMAGE_ID_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum ParseImageIdError {
    #[error("image id cannot be empty")]
    Empty,

    #[error("image id must start with 'ami-': {0}")]
    MissingPrefix(String),

    #[error("image id must be exactly {IMAGE_ID_LEN} characters, got {0}")]
    WrongLength(usize),

    #[error("invalid character in image id: '{0}'")]
    InvalidChar(char),
}

/// A shape-validated machine-image identifier.
///
/// A malformed identifier is a caller error, not a not-found condition;
/// parsing fails locally so no remote lookup is ever issued for one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    pub fn parse(value: &str) -> Result<Self, ParseImageIdError> {
        if value.is_empty() {
            return Err(ParseImageIdError::Empty);
        }

        if !value.starts_with(IMAGE_ID_PREFIX) {
            return Err(ParseImageIdError::MissingPrefix(value.to_string()));
        }

        if value.len() != IMAGE_ID_LEN {
            return Err(ParseImageIdError::WrongLength(value.len()));
        }

        for c in value[IMAGE_ID_PREFIX.len()..].chars() {
            if !c.is_ascii_hexdigit() || c.is_ascii_uppercase() {
                return Err(ParseImageIdError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
