// ABOUTME: Compute API operations trait.
// ABOUTME: Images, instances, security groups, key pairs, zones, and volumes.

use crate::types::{GroupId, InstanceId, ReservationId, VolumeId};
use async_trait::async_trait;

/// Compute-side operations: image records, instances, groups, volumes.
///
/// Lookup methods translate the provider's not-found responses into empty
/// results; absence is data, not an error. Mutating methods surface every
/// remote failure.
#[async_trait]
pub trait ComputeOps: Send + Sync {
    /// Images matching the given identifier. Unknown or foreign-shaped
    /// identifiers yield an empty list.
    async fn images_by_id(&self, image_id: &str) -> Result<Vec<MachineImage>, ComputeError>;

    /// Images owned by the calling account.
    async fn self_owned_images(&self) -> Result<Vec<MachineImage>, ComputeError>;

    /// Drop the image record. Backing storage is untouched.
    async fn deregister_image(&self, image_id: &str) -> Result<(), ComputeError>;

    /// Instances matching the given identifiers, or all instances when the
    /// list is empty. Unknown identifiers yield an empty list.
    async fn instances(&self, ids: &[InstanceId]) -> Result<Vec<InstanceRecord>, ComputeError>;

    /// Launch instances from an image.
    async fn run_instances(&self, spec: &LaunchSpec) -> Result<LaunchOutcome, ComputeError>;

    /// Terminate the given instances.
    async fn terminate_instances(
        &self,
        ids: &[InstanceId],
    ) -> Result<Vec<StateChange>, ComputeError>;

    /// Look up a security group by name.
    async fn security_group(
        &self,
        name: &str,
    ) -> Result<Option<SecurityGroupRecord>, ComputeError>;

    /// All security groups visible to the account.
    async fn security_groups(&self) -> Result<Vec<SecurityGroupRecord>, ComputeError>;

    /// Create a security group and return its identifier.
    async fn create_security_group(
        &self,
        name: &str,
        description: &str,
    ) -> Result<GroupId, ComputeError>;

    /// Open an ingress rule on a security group.
    async fn authorize_ingress(&self, group: &str, rule: &IngressRule)
    -> Result<(), ComputeError>;

    /// Look up a key pair by name.
    async fn key_pair(&self, name: &str) -> Result<Option<KeyPairRecord>, ComputeError>;

    /// Look up an availability zone by name.
    async fn zone(&self, name: &str) -> Result<Option<ZoneRecord>, ComputeError>;

    /// Volumes matching the given identifiers, or all volumes when the
    /// list is empty.
    async fn volumes(&self, ids: &[VolumeId]) -> Result<Vec<VolumeRecord>, ComputeError>;
}

/// Snapshot of a machine-image record.
///
/// Remote-owned and transient: stale as soon as anything mutates the image.
#[derive(Debug, Clone)]
pub struct MachineImage {
    /// Image identifier as the provider reports it.
    pub id: String,
    /// Storage location string, `bucket/path.manifest.xml`.
    pub location: String,
    /// Architecture tag, e.g. `i386` or `x86_64`.
    pub architecture: Option<String>,
    /// Registration state.
    pub state: Option<String>,
    /// Owning account.
    pub owner_id: Option<String>,
    /// Human-assigned name, if any.
    pub name: Option<String>,
}

/// Snapshot of an instance.
#[derive(Debug, Clone)]
pub struct InstanceRecord {
    pub id: InstanceId,
    pub state: Option<String>,
    pub dns_name: Option<String>,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    pub zone: Option<String>,
    pub instance_type: Option<String>,
}

/// Parameters for launching instances.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub image_id: String,
    pub instance_type: String,
    pub min_count: i32,
    pub max_count: i32,
    pub key_name: Option<String>,
    pub security_groups: Vec<String>,
    pub placement: Option<String>,
}

/// Result of a launch request.
#[derive(Debug, Clone)]
pub struct LaunchOutcome {
    pub reservation: Option<ReservationId>,
    pub instances: Vec<InstanceRecord>,
}

/// Instance state transition reported by a terminate call.
#[derive(Debug, Clone)]
pub struct StateChange {
    pub id: InstanceId,
    pub previous: Option<String>,
    pub current: Option<String>,
}

/// Snapshot of a security group.
#[derive(Debug, Clone)]
pub struct SecurityGroupRecord {
    pub id: Option<GroupId>,
    pub name: String,
    pub description: Option<String>,
}

/// An ingress rule to open on a security group.
///
/// Exactly one of `cidr` or `source_group` should be set; `source_group`
/// authorizes traffic from members of another (or the same) group.
#[derive(Debug, Clone)]
pub struct IngressRule {
    pub protocol: String,
    pub from_port: i32,
    pub to_port: i32,
    pub cidr: Option<String>,
    pub source_group: Option<String>,
}

impl IngressRule {
    /// SSH from anywhere.
    pub fn ssh() -> Self {
        Self {
            protocol: "tcp".to_string(),
            from_port: 22,
            to_port: 22,
            cidr: Some("0.0.0.0/0".to_string()),
            source_group: None,
        }
    }

    /// All traffic between members of the named group.
    pub fn intra_group(group: &str) -> Self {
        Self {
            protocol: "-1".to_string(),
            from_port: -1,
            to_port: -1,
            cidr: None,
            source_group: Some(group.to_string()),
        }
    }
}

/// Snapshot of a key pair.
#[derive(Debug, Clone)]
pub struct KeyPairRecord {
    pub name: String,
    pub fingerprint: Option<String>,
}

/// Snapshot of an availability zone.
#[derive(Debug, Clone)]
pub struct ZoneRecord {
    pub name: String,
    pub state: Option<String>,
}

/// Snapshot of a block-storage volume.
#[derive(Debug, Clone)]
pub struct VolumeRecord {
    pub id: VolumeId,
    pub size_gib: Option<i32>,
    pub state: Option<String>,
    pub zone: Option<String>,
    pub snapshot_id: Option<String>,
}

/// Errors from compute operations.
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("request rejected by the provider: {0}")]
    InvalidRequest(String),

    #[error("throttled by the provider: {0}")]
    Throttled(String),

    #[error("compute api error: {0}")]
    Remote(String),
}
