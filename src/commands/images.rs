// ABOUTME: Image command implementations.
// ABOUTME: Listing, backing-file inspection, and the removal workflow.

use super::connection::open_session;
use nimbus::config::Config;
use nimbus::error::Result;
use nimbus::output::Output;
use nimbus::removal::{self, RemovalOptions};
use nimbus::report;

/// List registered images grouped by architecture.
pub async fn images(config: &Config, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let images = session.registered_images().await?;
    output.result(report::format_images(&images).trim_end());
    Ok(())
}

/// List the storage objects backing an image.
pub async fn image_files(config: &Config, image_id: &str, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let files = session.get_image_files(image_id).await?;
    if files.is_empty() {
        output.progress(&format!("no backing files for {image_id}"));
    } else {
        output.result(report::format_objects(&files).trim_end());
    }
    Ok(())
}

/// Run the removal workflow: backing files first, record last.
pub async fn remove_image(
    config: &Config,
    image_id: &str,
    force: bool,
    files_only: bool,
    max_passes: Option<usize>,
    mut output: Output,
) -> Result<()> {
    let session = open_session(config)?;
    let opts = RemovalOptions {
        pretend: !force,
        max_passes: max_passes.unwrap_or(config.removal.max_passes),
    };

    if opts.pretend {
        output.progress(&format!(
            "Dry run: removing image {image_id} (pass --force to apply)"
        ));
    } else {
        output.progress(&format!("Removing image {image_id}"));
    }
    output.start_timer();

    let report = if files_only {
        removal::purge_image_files(session.compute(), session.storage(), image_id, &opts).await?
    } else {
        removal::remove_image(session.compute(), session.storage(), image_id, &opts).await?
    };

    for action in &report.actions {
        output.result(&action.to_string());
    }
    for failure in &report.failures {
        output.warning(&format!("failed to delete {}: {}", failure.key, failure.reason));
    }

    let touched = report.deleted_keys().count();
    if opts.pretend {
        output.success(&format!(
            "Dry run complete for {}: {touched} object(s) would be deleted",
            report.image
        ));
    } else {
        output.success(&format!(
            "Removed image {}: {touched} object(s) deleted",
            report.image
        ));
    }
    Ok(())
}
