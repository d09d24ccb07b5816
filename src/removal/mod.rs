// ABOUTME: Image-removal workflow.
// ABOUTME: Bounded delete-and-verify over backing files, then deregistration.

mod error;
mod trail;
mod workflow;

pub use error::RemovalError;
pub use trail::{Action, DeleteFailure, RemovalReport};
pub use workflow::{DEFAULT_MAX_PASSES, RemovalOptions, purge_image_files, remove_image};
