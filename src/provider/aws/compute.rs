// ABOUTME: ComputeOps implementation over aws-sdk-ec2.
// ABOUTME: Lazily connected client plus error-code mapping helpers.

use async_trait::async_trait;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_sdk_ec2::types::{Instance, InstanceType, Placement, SecurityGroup, Volume};
use tokio::sync::OnceCell;

use super::connect::ConnectionSettings;
use crate::provider::traits::{
    ComputeError, ComputeOps, IngressRule, InstanceRecord, KeyPairRecord, LaunchOutcome,
    LaunchSpec, MachineImage, SecurityGroupRecord, StateChange, VolumeRecord, ZoneRecord,
};
use crate::types::{GroupId, InstanceId, ReservationId, VolumeId};

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn classify_ec2(code: Option<&str>, message: Option<&str>, fallback: String) -> ComputeError {
    let msg = message.map(str::to_owned).unwrap_or(fallback);
    match code {
        Some("AuthFailure") | Some("UnauthorizedOperation") | Some("InvalidClientTokenId")
        | Some("SignatureDoesNotMatch") => ComputeError::AuthenticationFailed(msg),
        Some("RequestLimitExceeded") | Some("Throttling") => ComputeError::Throttled(msg),
        Some(c) if c.ends_with(".NotFound") => ComputeError::NotFound(msg),
        Some(c) if c.starts_with("InvalidParameter") || c == "MissingParameter" => {
            ComputeError::InvalidRequest(msg)
        }
        _ => ComputeError::Remote(msg),
    }
}

/// Identifier lookups treat a not-found (or malformed-id) rejection as an
/// empty result rather than an error.
fn is_empty_lookup(code: Option<&str>) -> bool {
    matches!(code, Some(c) if c.ends_with(".NotFound") || c.ends_with(".Malformed"))
}

// =============================================================================
// Record Conversions
// =============================================================================

fn to_machine_image(image: &aws_sdk_ec2::types::Image) -> MachineImage {
    MachineImage {
        id: image.image_id().unwrap_or_default().to_string(),
        location: image.image_location().unwrap_or_default().to_string(),
        architecture: image.architecture().map(|a| a.as_str().to_string()),
        state: image.state().map(|s| s.as_str().to_string()),
        owner_id: image.owner_id().map(str::to_owned),
        name: image.name().map(str::to_owned),
    }
}

fn to_instance_record(instance: &Instance) -> InstanceRecord {
    InstanceRecord {
        id: InstanceId::new(instance.instance_id().unwrap_or_default().to_string()),
        state: instance
            .state()
            .and_then(|s| s.name())
            .map(|n| n.as_str().to_string()),
        dns_name: instance.public_dns_name().map(str::to_owned),
        public_ip: instance.public_ip_address().map(str::to_owned),
        private_ip: instance.private_ip_address().map(str::to_owned),
        zone: instance
            .placement()
            .and_then(|p| p.availability_zone())
            .map(str::to_owned),
        instance_type: instance.instance_type().map(|t| t.as_str().to_string()),
    }
}

fn to_group_record(group: &SecurityGroup) -> SecurityGroupRecord {
    SecurityGroupRecord {
        id: group.group_id().map(|id| GroupId::new(id.to_string())),
        name: group.group_name().unwrap_or_default().to_string(),
        description: group.description().map(str::to_owned),
    }
}

fn to_volume_record(volume: &Volume) -> VolumeRecord {
    VolumeRecord {
        id: VolumeId::new(volume.volume_id().unwrap_or_default().to_string()),
        size_gib: volume.size(),
        state: volume.state().map(|s| s.as_str().to_string()),
        zone: volume.availability_zone().map(str::to_owned),
        snapshot_id: volume.snapshot_id().map(str::to_owned),
    }
}

// =============================================================================
// AwsCompute
// =============================================================================

/// Compute API backed by aws-sdk-ec2.
///
/// The client is opened on first use and reused for the lifetime of the
/// value; there is no re-authentication or expiry handling.
pub struct AwsCompute {
    settings: ConnectionSettings,
    client: OnceCell<Client>,
}

impl AwsCompute {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            settings,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                tracing::debug!(region = %self.settings.region, "opening compute connection");
                Client::new(&self.settings.sdk_config().await)
            })
            .await
    }
}

#[async_trait]
impl ComputeOps for AwsCompute {
    async fn images_by_id(&self, image_id: &str) -> Result<Vec<MachineImage>, ComputeError> {
        match self
            .client()
            .await
            .describe_images()
            .image_ids(image_id)
            .send()
            .await
        {
            Ok(out) => Ok(out.images().iter().map(to_machine_image).collect()),
            Err(e) if is_empty_lookup(e.code()) => Ok(Vec::new()),
            Err(e) => Err(classify_ec2(e.code(), e.message(), e.to_string())),
        }
    }

    async fn self_owned_images(&self) -> Result<Vec<MachineImage>, ComputeError> {
        let out = self
            .client()
            .await
            .describe_images()
            .owners("self")
            .send()
            .await
            .map_err(|e| classify_ec2(e.code(), e.message(), e.to_string()))?;
        Ok(out.images().iter().map(to_machine_image).collect())
    }

    async fn deregister_image(&self, image_id: &str) -> Result<(), ComputeError> {
        self.client()
            .await
            .deregister_image()
            .image_id(image_id)
            .send()
            .await
            .map_err(|e| classify_ec2(e.code(), e.message(), e.to_string()))?;
        Ok(())
    }

    async fn instances(&self, ids: &[InstanceId]) -> Result<Vec<InstanceRecord>, ComputeError> {
        let id_strings: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        let req = self
            .client()
            .await
            .describe_instances()
            .set_instance_ids((!id_strings.is_empty()).then_some(id_strings));
        match req.send().await {
            Ok(out) => {
                let mut records = Vec::new();
                for reservation in out.reservations() {
                    records.extend(reservation.instances().iter().map(to_instance_record));
                }
                Ok(records)
            }
            Err(e) if is_empty_lookup(e.code()) => Ok(Vec::new()),
            Err(e) => Err(classify_ec2(e.code(), e.message(), e.to_string())),
        }
    }

    async fn run_instances(&self, spec: &LaunchSpec) -> Result<LaunchOutcome, ComputeError> {
        let placement = spec
            .placement
            .as_ref()
            .map(|zone| Placement::builder().availability_zone(zone).build());
        let out = self
            .client()
            .await
            .run_instances()
            .image_id(&spec.image_id)
            .instance_type(InstanceType::from(spec.instance_type.as_str()))
            .min_count(spec.min_count)
            .max_count(spec.max_count)
            .set_key_name(spec.key_name.clone())
            .set_security_groups(
                (!spec.security_groups.is_empty()).then(|| spec.security_groups.clone()),
            )
            .set_placement(placement)
            .send()
            .await
            .map_err(|e| classify_ec2(e.code(), e.message(), e.to_string()))?;
        Ok(LaunchOutcome {
            reservation: out
                .reservation_id()
                .map(|id| ReservationId::new(id.to_string())),
            instances: out.instances().iter().map(to_instance_record).collect(),
        })
    }

    async fn terminate_instances(
        &self,
        ids: &[InstanceId],
    ) -> Result<Vec<StateChange>, ComputeError> {
        let id_strings: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        let out = self
            .client()
            .await
            .terminate_instances()
            .set_instance_ids(Some(id_strings))
            .send()
            .await
            .map_err(|e| classify_ec2(e.code(), e.message(), e.to_string()))?;
        Ok(out
            .terminating_instances()
            .iter()
            .map(|change| StateChange {
                id: InstanceId::new(change.instance_id().unwrap_or_default().to_string()),
                previous: change
                    .previous_state()
                    .and_then(|s| s.name())
                    .map(|n| n.as_str().to_string()),
                current: change
                    .current_state()
                    .and_then(|s| s.name())
                    .map(|n| n.as_str().to_string()),
            })
            .collect())
    }

    async fn security_group(
        &self,
        name: &str,
    ) -> Result<Option<SecurityGroupRecord>, ComputeError> {
        match self
            .client()
            .await
            .describe_security_groups()
            .group_names(name)
            .send()
            .await
        {
            Ok(out) => Ok(out.security_groups().first().map(to_group_record)),
            Err(e) if is_empty_lookup(e.code()) => Ok(None),
            Err(e) => Err(classify_ec2(e.code(), e.message(), e.to_string())),
        }
    }

    async fn security_groups(&self) -> Result<Vec<SecurityGroupRecord>, ComputeError> {
        let out = self
            .client()
            .await
            .describe_security_groups()
            .send()
            .await
            .map_err(|e| classify_ec2(e.code(), e.message(), e.to_string()))?;
        Ok(out.security_groups().iter().map(to_group_record).collect())
    }

    async fn create_security_group(
        &self,
        name: &str,
        description: &str,
    ) -> Result<GroupId, ComputeError> {
        let out = self
            .client()
            .await
            .create_security_group()
            .group_name(name)
            .description(description)
            .send()
            .await
            .map_err(|e| classify_ec2(e.code(), e.message(), e.to_string()))?;
        Ok(GroupId::new(out.group_id().unwrap_or_default().to_string()))
    }

    async fn authorize_ingress(
        &self,
        group: &str,
        rule: &IngressRule,
    ) -> Result<(), ComputeError> {
        self.client()
            .await
            .authorize_security_group_ingress()
            .group_name(group)
            .ip_protocol(&rule.protocol)
            .from_port(rule.from_port)
            .to_port(rule.to_port)
            .set_cidr_ip(rule.cidr.clone())
            .set_source_security_group_name(rule.source_group.clone())
            .send()
            .await
            .map_err(|e| classify_ec2(e.code(), e.message(), e.to_string()))?;
        Ok(())
    }

    async fn key_pair(&self, name: &str) -> Result<Option<KeyPairRecord>, ComputeError> {
        match self
            .client()
            .await
            .describe_key_pairs()
            .key_names(name)
            .send()
            .await
        {
            Ok(out) => Ok(out.key_pairs().first().map(|kp| KeyPairRecord {
                name: kp.key_name().unwrap_or_default().to_string(),
                fingerprint: kp.key_fingerprint().map(str::to_owned),
            })),
            Err(e) if is_empty_lookup(e.code()) => Ok(None),
            Err(e) => Err(classify_ec2(e.code(), e.message(), e.to_string())),
        }
    }

    async fn zone(&self, name: &str) -> Result<Option<ZoneRecord>, ComputeError> {
        match self
            .client()
            .await
            .describe_availability_zones()
            .zone_names(name)
            .send()
            .await
        {
            Ok(out) => Ok(out.availability_zones().first().map(|az| ZoneRecord {
                name: az.zone_name().unwrap_or_default().to_string(),
                state: az.state().map(|s| s.as_str().to_string()),
            })),
            // An unknown zone name is rejected as a bad parameter, not as a
            // missing resource.
            Err(e) if is_empty_lookup(e.code()) || matches!(e.code(), Some("InvalidParameterValue")) => {
                Ok(None)
            }
            Err(e) => Err(classify_ec2(e.code(), e.message(), e.to_string())),
        }
    }

    async fn volumes(&self, ids: &[VolumeId]) -> Result<Vec<VolumeRecord>, ComputeError> {
        let id_strings: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        let req = self
            .client()
            .await
            .describe_volumes()
            .set_volume_ids((!id_strings.is_empty()).then_some(id_strings));
        match req.send().await {
            Ok(out) => Ok(out.volumes().iter().map(to_volume_record).collect()),
            Err(e) if is_empty_lookup(e.code()) => Ok(Vec::new()),
            Err(e) => Err(classify_ec2(e.code(), e.message(), e.to_string())),
        }
    }
}
