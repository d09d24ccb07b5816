// ABOUTME: CloudSession - the top-level handle pairing compute and storage.
// ABOUTME: Resource accessors with optional image-list memoization.

use parking_lot::Mutex;
use thiserror::Error;

use crate::provider::{
    BucketRecord, ComputeOps, IngressRule, InstanceRecord, KeyPairRecord, LaunchOutcome,
    LaunchSpec, MachineImage, ProviderError, SecurityGroupRecord, StateChange, StorageObject,
    StorageOps, VolumeRecord, ZoneRecord,
};
use crate::types::{ImageId, InstanceId, ManifestLocation, ParseImageIdError, ParseManifestError, VolumeId};

/// Errors from session accessors.
///
/// A malformed identifier and a missing resource are distinct failures: the
/// first is a caller bug caught before any remote call, the second is an
/// answer from the provider.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid image id: {0}")]
    InvalidImageId(#[from] ParseImageIdError),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("image location is not a valid manifest path: {0}")]
    CorruptLocation(#[from] ParseManifestError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// One authenticated view of the cloud: a compute side, a storage side,
/// and an optional memo of the account's registered images.
///
/// With `cache` set, the registered-image list is fetched once and reused
/// for the lifetime of the session. Nothing invalidates it; a deletion
/// performed elsewhere (or by the removal workflow) leaves the memo stale.
pub struct CloudSession<C, S> {
    compute: C,
    storage: S,
    cache: bool,
    images: Mutex<Option<Vec<MachineImage>>>,
}

impl<C, S> CloudSession<C, S>
where
    C: ComputeOps,
    S: StorageOps,
{
    pub fn new(compute: C, storage: S, cache: bool) -> Self {
        Self {
            compute,
            storage,
            cache,
            images: Mutex::new(None),
        }
    }

    pub fn compute(&self) -> &C {
        &self.compute
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Images owned by this account, memoized when caching is on.
    pub async fn registered_images(&self) -> Result<Vec<MachineImage>, SessionError> {
        if self.cache {
            if let Some(cached) = self.images.lock().as_ref() {
                return Ok(cached.clone());
            }
        }
        let images = self
            .compute
            .self_owned_images()
            .await
            .map_err(ProviderError::from)?;
        if self.cache {
            *self.images.lock() = Some(images.clone());
        }
        Ok(images)
    }

    /// A self-owned image by validated identifier.
    ///
    /// The identifier shape is checked first; a malformed id fails locally
    /// without a remote call.
    pub async fn get_registered_image(&self, image_id: &str) -> Result<MachineImage, SessionError> {
        let id = ImageId::parse(image_id)?;
        self.registered_images()
            .await?
            .into_iter()
            .find(|image| image.id == id.as_str())
            .ok_or_else(|| SessionError::ImageNotFound(image_id.to_string()))
    }

    /// Any image by identifier; absence is `None`, never an error.
    pub async fn get_image(&self, image_id: &str) -> Result<Option<MachineImage>, SessionError> {
        let mut found = self
            .compute
            .images_by_id(image_id)
            .await
            .map_err(ProviderError::from)?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.remove(0)))
        }
    }

    /// The storage objects backing an image, located by the prefix derived
    /// from its manifest path.
    pub async fn get_image_files(&self, image_id: &str) -> Result<Vec<StorageObject>, SessionError> {
        let image = self
            .get_image(image_id)
            .await?
            .ok_or_else(|| SessionError::ImageNotFound(image_id.to_string()))?;
        let location = ManifestLocation::parse(&image.location)?;
        if !self
            .storage
            .bucket_exists(location.bucket())
            .await
            .map_err(ProviderError::from)?
        {
            return Err(SessionError::BucketNotFound(location.bucket().to_string()));
        }
        Ok(self
            .storage
            .list_objects(location.bucket(), Some(location.file_prefix()))
            .await
            .map_err(ProviderError::from)?)
    }

    pub async fn get_instance(&self, id: &InstanceId) -> Result<Option<InstanceRecord>, SessionError> {
        let mut found = self
            .compute
            .instances(std::slice::from_ref(id))
            .await
            .map_err(ProviderError::from)?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.remove(0)))
        }
    }

    pub async fn all_instances(&self) -> Result<Vec<InstanceRecord>, SessionError> {
        Ok(self.compute.instances(&[]).await.map_err(ProviderError::from)?)
    }

    pub async fn running_instances(&self) -> Result<Vec<InstanceRecord>, SessionError> {
        let mut instances = self.all_instances().await?;
        instances.retain(|instance| instance.state.as_deref() == Some("running"));
        Ok(instances)
    }

    pub async fn run_instances(&self, spec: &LaunchSpec) -> Result<LaunchOutcome, SessionError> {
        Ok(self.compute.run_instances(spec).await.map_err(ProviderError::from)?)
    }

    pub async fn terminate_instances(
        &self,
        ids: &[InstanceId],
    ) -> Result<Vec<StateChange>, SessionError> {
        Ok(self
            .compute
            .terminate_instances(ids)
            .await
            .map_err(ProviderError::from)?)
    }

    pub async fn get_security_group(
        &self,
        name: &str,
    ) -> Result<Option<SecurityGroupRecord>, SessionError> {
        Ok(self.compute.security_group(name).await.map_err(ProviderError::from)?)
    }

    pub async fn security_groups(&self) -> Result<Vec<SecurityGroupRecord>, SessionError> {
        Ok(self.compute.security_groups().await.map_err(ProviderError::from)?)
    }

    /// Look up a security group, creating it when absent.
    ///
    /// A newly created group gets SSH ingress unless `auth_ssh` is off, and
    /// intra-group traffic when `auth_group_traffic` is on. Description
    /// only applies on creation.
    pub async fn get_or_create_group(
        &self,
        name: &str,
        description: &str,
        auth_ssh: bool,
        auth_group_traffic: bool,
    ) -> Result<SecurityGroupRecord, SessionError> {
        if let Some(existing) = self.get_security_group(name).await? {
            return Ok(existing);
        }
        tracing::info!("creating security group {name}");
        let id = self
            .compute
            .create_security_group(name, description)
            .await
            .map_err(ProviderError::from)?;
        if auth_ssh {
            self.compute
                .authorize_ingress(name, &IngressRule::ssh())
                .await
                .map_err(ProviderError::from)?;
        }
        if auth_group_traffic {
            self.compute
                .authorize_ingress(name, &IngressRule::intra_group(name))
                .await
                .map_err(ProviderError::from)?;
        }
        Ok(SecurityGroupRecord {
            id: Some(id),
            name: name.to_string(),
            description: Some(description.to_string()),
        })
    }

    pub async fn get_keypair(&self, name: &str) -> Result<Option<KeyPairRecord>, SessionError> {
        Ok(self.compute.key_pair(name).await.map_err(ProviderError::from)?)
    }

    pub async fn get_zone(&self, name: &str) -> Result<Option<ZoneRecord>, SessionError> {
        Ok(self.compute.zone(name).await.map_err(ProviderError::from)?)
    }

    pub async fn get_volume(&self, id: &VolumeId) -> Result<Option<VolumeRecord>, SessionError> {
        let mut found = self
            .compute
            .volumes(std::slice::from_ref(id))
            .await
            .map_err(ProviderError::from)?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.remove(0)))
        }
    }

    pub async fn volumes(&self) -> Result<Vec<VolumeRecord>, SessionError> {
        Ok(self.compute.volumes(&[]).await.map_err(ProviderError::from)?)
    }

    pub async fn buckets(&self) -> Result<Vec<BucketRecord>, SessionError> {
        Ok(self.storage.buckets().await.map_err(ProviderError::from)?)
    }

    pub async fn bucket_exists(&self, name: &str) -> Result<bool, SessionError> {
        Ok(self.storage.bucket_exists(name).await.map_err(ProviderError::from)?)
    }

    /// Objects in a bucket. The bucket is looked up first so a missing
    /// bucket reports as `BucketNotFound` rather than a listing failure.
    pub async fn bucket_objects(
        &self,
        name: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<StorageObject>, SessionError> {
        if !self.bucket_exists(name).await? {
            return Err(SessionError::BucketNotFound(name.to_string()));
        }
        Ok(self
            .storage
            .list_objects(name, prefix)
            .await
            .map_err(ProviderError::from)?)
    }
}
