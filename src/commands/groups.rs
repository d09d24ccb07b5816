// ABOUTME: Security group command implementations.
// ABOUTME: Listing and idempotent lookup-or-create.

use super::connection::open_session;
use nimbus::config::Config;
use nimbus::error::Result;
use nimbus::output::Output;
use nimbus::report;

/// List security groups.
pub async fn groups(config: &Config, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let groups = session.security_groups().await?;
    if groups.is_empty() {
        output.progress("No security groups found");
    } else {
        output.result(report::format_groups(&groups).trim_end());
    }
    Ok(())
}

/// Look up a group by name, creating it (with default ingress) if absent.
pub async fn ensure_group(
    config: &Config,
    name: &str,
    description: &str,
    auth_ssh: bool,
    auth_group_traffic: bool,
    output: &Output,
) -> Result<()> {
    let session = open_session(config)?;
    let group = session
        .get_or_create_group(name, description, auth_ssh, auth_group_traffic)
        .await?;
    match &group.id {
        Some(id) => output.result(&format!("{} {}", id, group.name)),
        None => output.result(&group.name),
    }
    Ok(())
}
