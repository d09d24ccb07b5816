// ABOUTME: Bucket command implementations.
// ABOUTME: Listing buckets and the objects inside them.

use super::connection::open_session;
use nimbus::config::Config;
use nimbus::error::Result;
use nimbus::output::Output;
use nimbus::report;

/// List storage buckets.
pub async fn buckets(config: &Config, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let buckets = session.buckets().await?;
    if buckets.is_empty() {
        output.progress("No buckets found");
    } else {
        output.result(report::format_buckets(&buckets).trim_end());
    }
    Ok(())
}

/// List the objects in a bucket.
pub async fn show_bucket(config: &Config, bucket: &str, output: &Output) -> Result<()> {
    let session = open_session(config)?;
    let objects = session.bucket_objects(bucket, None).await?;
    if objects.is_empty() {
        output.progress(&format!("bucket {bucket} is empty"));
    } else {
        output.result(report::format_objects(&objects).trim_end());
    }
    Ok(())
}
