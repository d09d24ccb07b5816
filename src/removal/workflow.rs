// ABOUTME: The delete-and-verify removal workflow.
// ABOUTME: Files first, bounded retry on residuals, deregister last.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::error::RemovalError;
use super::trail::{Action, RemovalReport};
use crate::provider::{ComputeOps, MachineImage, ProviderError, StorageOps};
use crate::types::ManifestLocation;

/// Delete passes attempted before giving up on a backing set that will
/// not empty.
pub const DEFAULT_MAX_PASSES: usize = 3;

/// Knobs for one removal run.
#[derive(Debug, Clone)]
pub struct RemovalOptions {
    /// Report intended actions without mutating anything.
    pub pretend: bool,
    /// Upper bound on delete/verify passes.
    pub max_passes: usize,
}

impl Default for RemovalOptions {
    fn default() -> Self {
        Self {
            pretend: true,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Remove an image: delete its backing files, verify the bucket prefix is
/// clear, then deregister the record.
///
/// Files are always addressed before the record so an interrupted run can
/// only leave orphaned files, never a deregistered image with live
/// storage. In pretend mode no mutating call is ever issued.
pub async fn remove_image<C, S>(
    compute: &C,
    storage: &S,
    image_id: &str,
    opts: &RemovalOptions,
) -> Result<RemovalReport, RemovalError>
where
    C: ComputeOps,
    S: StorageOps,
{
    let (image, location) = lookup(compute, storage, image_id).await?;
    if opts.pretend {
        info!("dry run: removing image {}", image.id);
    } else {
        info!("removing image {}", image.id);
    }

    let mut report = RemovalReport::new(image.id.clone());
    purge_files(storage, &location, opts, &mut report).await?;

    if opts.pretend {
        info!("would deregister image {}", image.id);
        report.record(Action::WouldDeregister {
            image: image.id.clone(),
        });
    } else {
        info!("deregistering image {}", image.id);
        compute
            .deregister_image(&image.id)
            .await
            .map_err(ProviderError::from)?;
        report.record(Action::Deregister {
            image: image.id.clone(),
        });
    }
    Ok(report)
}

/// Delete an image's backing files without touching the image record.
pub async fn purge_image_files<C, S>(
    compute: &C,
    storage: &S,
    image_id: &str,
    opts: &RemovalOptions,
) -> Result<RemovalReport, RemovalError>
where
    C: ComputeOps,
    S: StorageOps,
{
    let (image, location) = lookup(compute, storage, image_id).await?;
    let mut report = RemovalReport::new(image.id);
    purge_files(storage, &location, opts, &mut report).await?;
    Ok(report)
}

/// Resolve the image and the bucket/prefix its files live under.
///
/// Aborts before any deletion on a missing image, an undecodable location
/// string, or a bucket the storage side cannot find.
async fn lookup<C, S>(
    compute: &C,
    storage: &S,
    image_id: &str,
) -> Result<(MachineImage, ManifestLocation), RemovalError>
where
    C: ComputeOps,
    S: StorageOps,
{
    let image = compute
        .images_by_id(image_id)
        .await
        .map_err(ProviderError::from)?
        .into_iter()
        .next()
        .ok_or_else(|| RemovalError::ImageNotFound(image_id.to_string()))?;

    let location =
        ManifestLocation::parse(&image.location).map_err(|source| RemovalError::CorruptLocation {
            image: image.id.clone(),
            source,
        })?;

    if !storage
        .bucket_exists(location.bucket())
        .await
        .map_err(ProviderError::from)?
    {
        return Err(RemovalError::BucketNotFound {
            image: image.id.clone(),
            bucket: location.bucket().to_string(),
        });
    }

    Ok((image, location))
}

/// The delete/verify loop.
///
/// Each pass deletes whatever the listing currently shows, one object at a
/// time; a failed delete is recorded and the batch moves on. The verify
/// step re-enumerates with the same prefix. In pretend mode nothing was
/// mutated, so verification subtracts the objects already reported as
/// would-deleted and never retries.
async fn purge_files<S>(
    storage: &S,
    location: &ManifestLocation,
    opts: &RemovalOptions,
    report: &mut RemovalReport,
) -> Result<(), RemovalError>
where
    S: StorageOps,
{
    let bucket = location.bucket();
    let prefix = location.file_prefix();

    let mut remaining = storage
        .list_objects(bucket, Some(prefix))
        .await
        .map_err(ProviderError::from)?;
    let mut simulated: HashSet<String> = HashSet::new();
    let mut passes = 0usize;

    while !remaining.is_empty() {
        if passes == opts.max_passes {
            warn!(
                "{} object(s) under {}/{} survived {} delete pass(es); giving up",
                remaining.len(),
                bucket,
                prefix,
                passes
            );
            return Err(RemovalError::DeletionIncomplete {
                remaining: remaining.len(),
                passes,
            });
        }
        passes += 1;
        report.passes = passes;

        for object in &remaining {
            if opts.pretend {
                info!("would delete {}/{}", bucket, object.key);
                simulated.insert(object.key.clone());
                report.record(Action::WouldDeleteFile {
                    key: object.key.clone(),
                });
            } else {
                match storage.delete_object(bucket, &object.key).await {
                    Ok(()) => {
                        info!("deleted {}/{}", bucket, object.key);
                        report.record(Action::DeleteFile {
                            key: object.key.clone(),
                        });
                    }
                    Err(reason) => {
                        warn!("failed to delete {}/{}: {reason}", bucket, object.key);
                        report.record_failure(object.key.clone(), reason);
                    }
                }
            }
        }

        let listed = storage
            .list_objects(bucket, Some(prefix))
            .await
            .map_err(ProviderError::from)?;
        remaining = if opts.pretend {
            listed
                .into_iter()
                .filter(|object| !simulated.contains(&object.key))
                .collect()
        } else {
            listed
        };
        report.record(Action::Verify {
            remaining: remaining.len(),
        });

        if !remaining.is_empty() {
            if opts.pretend {
                // A dry run mutates nothing; another pass would report the
                // same objects again.
                warn!(
                    "dry run: {} object(s) under {}/{} not covered; not retrying",
                    remaining.len(),
                    bucket,
                    prefix
                );
                return Err(RemovalError::DeletionIncomplete {
                    remaining: remaining.len(),
                    passes,
                });
            }
            info!(
                "{} object(s) under {}/{} still present, retrying",
                remaining.len(),
                bucket,
                prefix
            );
        }
    }

    if passes == 0 {
        debug!("no backing files under {}/{}", bucket, prefix);
        report.record(Action::Verify { remaining: 0 });
    }
    Ok(())
}
