// ABOUTME: Shared test fixtures: an in-memory recording cloud provider.
// ABOUTME: Implements ComputeOps and StorageOps over plain collections.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use nimbus::provider::{
    BucketRecord, ComputeError, ComputeOps, IngressRule, InstanceRecord, KeyPairRecord,
    LaunchOutcome, LaunchSpec, MachineImage, SecurityGroupRecord, StateChange, StorageError,
    StorageObject, StorageOps, VolumeRecord, ZoneRecord,
};
use nimbus::types::{GroupId, InstanceId, VolumeId};

/// An in-memory cloud that records every remote call it receives.
///
/// Buckets map to sorted key sets so listings are deterministic. Keys in
/// `undeletable` always fail to delete; keys in `fail_once` fail a single
/// time, then behave normally.
#[derive(Default)]
pub struct FakeCloud {
    pub images: Mutex<Vec<MachineImage>>,
    pub instances: Mutex<Vec<InstanceRecord>>,
    pub volumes: Mutex<Vec<VolumeRecord>>,
    pub objects: Mutex<BTreeMap<String, BTreeSet<String>>>,
    pub calls: Mutex<Vec<String>>,
    pub deregistered: Mutex<Vec<String>>,
    pub undeletable: Mutex<BTreeSet<String>>,
    pub fail_once: Mutex<BTreeSet<String>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, id: &str, location: &str) -> Self {
        self.images.lock().unwrap().push(MachineImage {
            id: id.to_string(),
            location: location.to_string(),
            architecture: Some("x86_64".to_string()),
            state: Some("available".to_string()),
            owner_id: Some("self".to_string()),
            name: None,
        });
        self
    }

    pub fn with_instance(self, id: &str, state: &str) -> Self {
        self.instances.lock().unwrap().push(InstanceRecord {
            id: InstanceId::from(id),
            state: Some(state.to_string()),
            dns_name: None,
            public_ip: None,
            private_ip: None,
            zone: None,
            instance_type: None,
        });
        self
    }

    pub fn with_volume(self, id: &str, size_gib: i32) -> Self {
        self.volumes.lock().unwrap().push(VolumeRecord {
            id: VolumeId::from(id),
            size_gib: Some(size_gib),
            state: Some("available".to_string()),
            zone: None,
            snapshot_id: None,
        });
        self
    }

    pub fn with_bucket(self, bucket: &str) -> Self {
        self.objects
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default();
        self
    }

    pub fn with_object(self, bucket: &str, key: &str) -> Self {
        self.objects
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string());
        self
    }

    pub fn mark_undeletable(&self, key: &str) {
        self.undeletable.lock().unwrap().insert(key.to_string());
    }

    pub fn mark_fail_once(&self, key: &str) {
        self.fail_once.lock().unwrap().insert(key.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn keys_in(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .get(bucket)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ComputeOps for FakeCloud {
    async fn images_by_id(&self, image_id: &str) -> Result<Vec<MachineImage>, ComputeError> {
        self.record(format!("describe-images {image_id}"));
        Ok(self
            .images
            .lock()
            .unwrap()
            .iter()
            .filter(|image| image.id == image_id)
            .cloned()
            .collect())
    }

    async fn self_owned_images(&self) -> Result<Vec<MachineImage>, ComputeError> {
        self.record("describe-images self".to_string());
        Ok(self.images.lock().unwrap().clone())
    }

    async fn deregister_image(&self, image_id: &str) -> Result<(), ComputeError> {
        self.record(format!("deregister-image {image_id}"));
        self.deregistered.lock().unwrap().push(image_id.to_string());
        self.images.lock().unwrap().retain(|image| image.id != image_id);
        Ok(())
    }

    async fn instances(&self, ids: &[InstanceId]) -> Result<Vec<InstanceRecord>, ComputeError> {
        self.record("describe-instances".to_string());
        let all = self.instances.lock().unwrap().clone();
        if ids.is_empty() {
            Ok(all)
        } else {
            Ok(all
                .into_iter()
                .filter(|instance| ids.contains(&instance.id))
                .collect())
        }
    }

    async fn run_instances(&self, spec: &LaunchSpec) -> Result<LaunchOutcome, ComputeError> {
        self.record(format!("run-instances {}", spec.image_id));
        Ok(LaunchOutcome {
            reservation: None,
            instances: Vec::new(),
        })
    }

    async fn terminate_instances(
        &self,
        ids: &[InstanceId],
    ) -> Result<Vec<StateChange>, ComputeError> {
        self.record(format!("terminate-instances {}", ids.len()));
        Ok(Vec::new())
    }

    async fn security_group(
        &self,
        name: &str,
    ) -> Result<Option<SecurityGroupRecord>, ComputeError> {
        self.record(format!("describe-security-groups {name}"));
        Ok(None)
    }

    async fn security_groups(&self) -> Result<Vec<SecurityGroupRecord>, ComputeError> {
        self.record("describe-security-groups".to_string());
        Ok(Vec::new())
    }

    async fn create_security_group(
        &self,
        name: &str,
        _description: &str,
    ) -> Result<GroupId, ComputeError> {
        self.record(format!("create-security-group {name}"));
        Ok(GroupId::new(format!("sg-{name}")))
    }

    async fn authorize_ingress(
        &self,
        group: &str,
        rule: &IngressRule,
    ) -> Result<(), ComputeError> {
        self.record(format!("authorize-ingress {group} {}", rule.protocol));
        Ok(())
    }

    async fn key_pair(&self, name: &str) -> Result<Option<KeyPairRecord>, ComputeError> {
        self.record(format!("describe-key-pairs {name}"));
        Ok(None)
    }

    async fn zone(&self, name: &str) -> Result<Option<ZoneRecord>, ComputeError> {
        self.record(format!("describe-availability-zones {name}"));
        Ok(None)
    }

    async fn volumes(&self, ids: &[VolumeId]) -> Result<Vec<VolumeRecord>, ComputeError> {
        self.record("describe-volumes".to_string());
        let all = self.volumes.lock().unwrap().clone();
        if ids.is_empty() {
            Ok(all)
        } else {
            Ok(all
                .into_iter()
                .filter(|volume| ids.contains(&volume.id))
                .collect())
        }
    }
}

#[async_trait]
impl StorageOps for FakeCloud {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        self.record(format!("head-bucket {bucket}"));
        Ok(self.objects.lock().unwrap().contains_key(bucket))
    }

    async fn buckets(&self) -> Result<Vec<BucketRecord>, StorageError> {
        self.record("list-buckets".to_string());
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .map(|name| BucketRecord {
                name: name.clone(),
                created: None,
            })
            .collect())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<StorageObject>, StorageError> {
        self.record(format!("list-objects {bucket} {}", prefix.unwrap_or("")));
        let guard = self.objects.lock().unwrap();
        let Some(keys) = guard.get(bucket) else {
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        };
        let prefix = prefix.unwrap_or("");
        Ok(keys
            .iter()
            .filter(|key| key.starts_with(prefix))
            .map(|key| StorageObject {
                key: key.clone(),
                size: Some(1024),
                last_modified: None,
            })
            .collect())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.record(format!("delete-object {bucket}/{key}"));
        if self.undeletable.lock().unwrap().contains(key) {
            return Err(StorageError::Remote(format!(
                "simulated permanent failure deleting {key}"
            )));
        }
        if self.fail_once.lock().unwrap().remove(key) {
            return Err(StorageError::Remote(format!(
                "simulated transient failure deleting {key}"
            )));
        }
        if let Some(keys) = self.objects.lock().unwrap().get_mut(bucket) {
            keys.remove(key);
        }
        Ok(())
    }
}
