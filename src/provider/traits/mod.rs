// ABOUTME: Capability traits for cloud provider APIs.
// ABOUTME: Defines ComputeOps and StorageOps plus their record types.

mod compute;
mod storage;

pub use compute::{
    ComputeError, ComputeOps, IngressRule, InstanceRecord, KeyPairRecord, LaunchOutcome,
    LaunchSpec, MachineImage, SecurityGroupRecord, StateChange, VolumeRecord, ZoneRecord,
};
pub use storage::{BucketRecord, StorageError, StorageObject, StorageOps};
