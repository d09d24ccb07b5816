// ABOUTME: Session construction shared by all command handlers.
// ABOUTME: Resolves credentials and builds the AWS-backed CloudSession.

use nimbus::config::Config;
use nimbus::error::Result;
use nimbus::provider::aws::{AwsCompute, AwsStorage, ConnectionSettings};
use nimbus::session::CloudSession;

/// Build a session from the config. Nothing connects until the first
/// remote call; each API side opens its own client lazily.
pub fn open_session(config: &Config) -> Result<CloudSession<AwsCompute, AwsStorage>> {
    let settings = ConnectionSettings::new(
        config.credentials()?,
        config.region.clone(),
        config.operation_timeout,
    );
    Ok(CloudSession::new(
        AwsCompute::new(settings.clone()),
        AwsStorage::new(settings),
        config.cache,
    ))
}
