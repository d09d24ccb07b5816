// ABOUTME: Plain-text listing formatters for cloud resources.
// ABOUTME: Pure string builders so listings are testable without a terminal.

use std::collections::BTreeMap;

use crate::provider::{
    BucketRecord, InstanceRecord, MachineImage, SecurityGroupRecord, StorageObject, VolumeRecord,
};
use crate::types::ManifestLocation;

fn header(title: &str, out: &mut String) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    out.push('\n');
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

/// Short display name for an image: the manifest basename when the
/// location decodes, the raw location otherwise.
pub fn image_name(image: &MachineImage) -> String {
    match ManifestLocation::parse(&image.location) {
        Ok(location) => location.file_prefix().to_string(),
        Err(_) => image.location.clone(),
    }
}

/// Registered images grouped by architecture, sorted by location within
/// each group.
pub fn format_images(images: &[MachineImage]) -> String {
    let mut by_arch: BTreeMap<String, Vec<&MachineImage>> = BTreeMap::new();
    for image in images {
        let arch = image
            .architecture
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        by_arch.entry(arch).or_default().push(image);
    }

    let mut out = String::new();
    for (arch, mut group) in by_arch {
        group.sort_by(|a, b| a.location.cmp(&b.location));
        header(&format!("{arch} images:"), &mut out);
        for (index, image) in group.iter().enumerate() {
            out.push_str(&format!("[{index}] {} {}\n", image.id, image_name(image)));
        }
        out.push('\n');
    }
    out.push_str(&format!("total registered images: {}\n", images.len()));
    out
}

pub fn format_instances(instances: &[InstanceRecord]) -> String {
    let mut out = String::new();
    for instance in instances {
        out.push_str(&format!("id: {}\n", instance.id));
        out.push_str(&format!("dns_name: {}\n", or_na(instance.dns_name.as_deref())));
        out.push_str(&format!("state: {}\n", or_na(instance.state.as_deref())));
        out.push_str(&format!("public_ip: {}\n", or_na(instance.public_ip.as_deref())));
        out.push_str(&format!(
            "private_ip: {}\n",
            or_na(instance.private_ip.as_deref())
        ));
        out.push_str(&format!("zone: {}\n", or_na(instance.zone.as_deref())));
        out.push('\n');
    }
    out
}

pub fn format_volumes(volumes: &[VolumeRecord]) -> String {
    let mut out = String::new();
    for volume in volumes {
        out.push_str(&format!("volume_id: {}\n", volume.id));
        if let Some(size) = volume.size_gib {
            out.push_str(&format!("size: {size}GB\n"));
        }
        out.push_str(&format!("status: {}\n", or_na(volume.state.as_deref())));
        out.push_str(&format!(
            "availability_zone: {}\n",
            or_na(volume.zone.as_deref())
        ));
        if let Some(snapshot) = &volume.snapshot_id {
            out.push_str(&format!("snapshot_id: {snapshot}\n"));
        }
        out.push('\n');
    }
    out
}

pub fn format_groups(groups: &[SecurityGroupRecord]) -> String {
    let mut out = String::new();
    for group in groups {
        let id = group
            .id
            .as_ref()
            .map(|id| id.as_str().to_string())
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!(
            "{} {} {}\n",
            id,
            group.name,
            group.description.as_deref().unwrap_or("")
        ));
    }
    out
}

pub fn format_buckets(buckets: &[BucketRecord]) -> String {
    let mut out = String::new();
    for bucket in buckets {
        match bucket.created {
            Some(created) => out.push_str(&format!(
                "{} (created {})\n",
                bucket.name,
                created.format("%Y-%m-%d")
            )),
            None => {
                out.push_str(&bucket.name);
                out.push('\n');
            }
        }
    }
    out
}

pub fn format_objects(objects: &[StorageObject]) -> String {
    let mut out = String::new();
    for object in objects {
        match object.size {
            Some(size) => out.push_str(&format!("{} ({size} bytes)\n", object.key)),
            None => {
                out.push_str(&object.key);
                out.push('\n');
            }
        }
    }
    out
}
