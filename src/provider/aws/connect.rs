// ABOUTME: Connection settings shared by the compute and storage clients.
// ABOUTME: Static credentials, region, and per-operation timeouts.

use std::fmt;
use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Static API credentials supplied at construction. No rotation support.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Everything needed to open a client to one side of the provider API.
///
/// Each API side holds its own copy and connects lazily on first use; the
/// resulting client is memoized for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub credentials: Credentials,
    pub region: String,
    /// Upper bound on a single remote call. The provider has no server-side
    /// deadline, so an explicit client timeout is the only hang protection.
    pub operation_timeout: Duration,
}

impl ConnectionSettings {
    pub fn new(credentials: Credentials, region: impl Into<String>, operation_timeout: Duration) -> Self {
        Self {
            credentials,
            region: region.into(),
            operation_timeout,
        }
    }

    /// Build the shared SDK configuration. Credentials are not validated
    /// here; bad keys surface as authentication errors on the first call.
    pub(crate) async fn sdk_config(&self) -> SdkConfig {
        let timeout = TimeoutConfig::builder()
            .operation_timeout(self.operation_timeout)
            .build();

        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(aws_sdk_ec2::config::Credentials::new(
                self.credentials.access_key_id.clone(),
                self.credentials.secret_access_key.clone(),
                None,
                None,
                "nimbus-config",
            ))
            .timeout_config(timeout)
            .load()
            .await
    }
}
