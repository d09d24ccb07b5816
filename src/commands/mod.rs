// ABOUTME: Command module aggregator for the nimbus CLI.
// ABOUTME: Re-exports the per-area command handlers.

mod connection;
mod groups;
mod images;
mod instances;
mod storage;

pub use groups::{ensure_group, groups};
pub use images::{image_files, images, remove_image};
pub use instances::{instances, launch, terminate, volumes};
pub use storage::{buckets, show_bucket};
