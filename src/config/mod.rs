// ABOUTME: Configuration types and parsing for nimbus.yml.
// ABOUTME: Handles YAML parsing, secret indirection, and config discovery.

mod init;
mod secret_value;

pub use init::init_config;
pub use secret_value::SecretValue;

use crate::error::{Error, Result};
use crate::provider::aws::Credentials;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "nimbus.yml";
pub const CONFIG_FILENAME_ALT: &str = "nimbus.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".nimbus/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub access_key_id: SecretValue,

    pub secret_access_key: SecretValue,

    #[serde(default = "default_region")]
    pub region: String,

    /// Memoize the registered-image listing for the session's lifetime.
    /// Nothing invalidates the memo; leave this off unless listings are
    /// the bottleneck.
    #[serde(default)]
    pub cache: bool,

    #[serde(default = "default_operation_timeout", with = "humantime_serde")]
    pub operation_timeout: Duration,

    #[serde(default)]
    pub removal: RemovalConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemovalConfig {
    /// Delete/verify passes before a removal gives up.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            max_passes: default_max_passes(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_operation_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_passes() -> usize {
    crate::removal::DEFAULT_MAX_PASSES
}

impl Config {
    /// Parse a config from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Find and parse the config file, checking `nimbus.yml`,
    /// `nimbus.yaml`, then `.nimbus/config.yml` under the given directory.
    pub fn discover(dir: &Path) -> Result<Self> {
        for candidate in [CONFIG_FILENAME, CONFIG_FILENAME_ALT, CONFIG_FILENAME_DIR] {
            let path = dir.join(candidate);
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                return Self::from_yaml(&contents);
            }
        }
        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Resolve credential values (env indirection included) into the
    /// provider credential pair.
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials::new(
            self.access_key_id.resolve()?,
            self.secret_access_key.resolve()?,
        ))
    }

    /// Starting point for `init` scaffolding: credentials from the
    /// conventional environment variables.
    pub fn template() -> Self {
        Self {
            access_key_id: SecretValue::FromEnv {
                var: "AWS_ACCESS_KEY_ID".to_string(),
                default: None,
            },
            secret_access_key: SecretValue::FromEnv {
                var: "AWS_SECRET_ACCESS_KEY".to_string(),
                default: None,
            },
            region: default_region(),
            cache: false,
            operation_timeout: default_operation_timeout(),
            removal: RemovalConfig::default(),
        }
    }
}
