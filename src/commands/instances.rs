// ABOUTME: Instance and volume command implementations.
// ABOUTME: Listing, launching, and terminating instances.

use super::connection::open_session;
use nimbus::config::Config;
use nimbus::error::{Error, Result};
use nimbus::output::Output;
use nimbus::provider::LaunchSpec;
use nimbus::report;
use nimbus::types::{ImageId, InstanceId};

/// List instances, optionally narrowed to running ones.
pub async fn instances(config: &Config, running: bool, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let instances = if running {
        session.running_instances().await?
    } else {
        session.all_instances().await?
    };
    if instances.is_empty() {
        output.progress("No instances found");
    } else {
        output.result(report::format_instances(&instances).trim_end());
    }
    Ok(())
}

/// Launch instances from an image.
#[allow(clippy::too_many_arguments)]
pub async fn launch(
    config: &Config,
    image_id: &str,
    instance_type: String,
    count: i32,
    key_name: Option<String>,
    groups: Vec<String>,
    zone: Option<String>,
    mut output: Output,
) -> Result<()> {
    // Shape check first: a malformed id never reaches the provider.
    ImageId::parse(image_id)?;

    let session = open_session(config)?;
    if let Some(name) = &key_name {
        if session.get_keypair(name).await?.is_none() {
            return Err(Error::KeyPairNotFound(name.clone()));
        }
    }
    if let Some(name) = &zone {
        if session.get_zone(name).await?.is_none() {
            return Err(Error::ZoneNotFound(name.clone()));
        }
    }

    output.start_timer();
    output.progress(&format!(
        "Launching {count} {instance_type} instance(s) from {image_id}"
    ));
    let outcome = session
        .run_instances(&LaunchSpec {
            image_id: image_id.to_string(),
            instance_type,
            min_count: count,
            max_count: count,
            key_name,
            security_groups: groups,
            placement: zone,
        })
        .await?;

    if let Some(reservation) = &outcome.reservation {
        output.progress(&format!("reservation: {reservation}"));
    }
    for instance in &outcome.instances {
        output.result(instance.id.as_str());
    }
    output.success(&format!("Launched {} instance(s)", outcome.instances.len()));
    Ok(())
}

/// Terminate the given instances.
pub async fn terminate(config: &Config, instance_ids: Vec<String>, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let ids: Vec<InstanceId> = instance_ids
        .iter()
        .map(|id| InstanceId::new(id.clone()))
        .collect();
    let changes = session.terminate_instances(&ids).await?;
    for change in &changes {
        output.result(&format!(
            "{}: {} -> {}",
            change.id,
            change.previous.as_deref().unwrap_or("unknown"),
            change.current.as_deref().unwrap_or("unknown"),
        ));
    }
    output.success(&format!("Terminated {} instance(s)", changes.len()));
    Ok(())
}

/// List volumes with their snapshots.
pub async fn volumes(config: &Config, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let volumes = session.volumes().await?;
    if volumes.is_empty() {
        output.progress("No volumes found");
    } else {
        output.result(report::format_volumes(&volumes).trim_end());
    }
    Ok(())
}
