// ABOUTME: Action trail for the removal workflow.
// ABOUTME: Records what was done, or would be done in a dry run.

use std::fmt;

use crate::provider::StorageError;

/// One step the workflow took, or reported it would take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A backing object was deleted.
    DeleteFile { key: String },
    /// Dry run: the object would have been deleted.
    WouldDeleteFile { key: String },
    /// The backing set was re-enumerated; `remaining` objects were left.
    Verify { remaining: usize },
    /// The image record was deregistered.
    Deregister { image: String },
    /// Dry run: the record would have been deregistered.
    WouldDeregister { image: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::DeleteFile { key } => write!(f, "delete {key}"),
            Action::WouldDeleteFile { key } => write!(f, "would-delete {key}"),
            Action::Verify { remaining: 0 } => write!(f, "verify: empty"),
            Action::Verify { remaining } => write!(f, "verify: {remaining} remaining"),
            Action::Deregister { image } => write!(f, "deregister {image}"),
            Action::WouldDeregister { image } => write!(f, "would-deregister {image}"),
        }
    }
}

/// A per-object delete that failed. The batch continues past these.
#[derive(Debug)]
pub struct DeleteFailure {
    pub key: String,
    pub reason: StorageError,
}

/// The trail of a completed (or dry-run) removal.
#[derive(Debug, Default)]
pub struct RemovalReport {
    /// Image the workflow ran against.
    pub image: String,
    /// Every action in the order it happened. File actions always precede
    /// the deregister action.
    pub actions: Vec<Action>,
    /// Deletes that failed and were skipped over.
    pub failures: Vec<DeleteFailure>,
    /// Delete passes performed (zero when the backing set was already empty).
    pub passes: usize,
}

impl RemovalReport {
    pub(crate) fn new(image: String) -> Self {
        Self {
            image,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn record_failure(&mut self, key: String, reason: StorageError) {
        self.failures.push(DeleteFailure { key, reason });
    }

    /// Keys of the objects deleted (or would-be deleted) by this run.
    pub fn deleted_keys(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().filter_map(|action| match action {
            Action::DeleteFile { key } | Action::WouldDeleteFile { key } => Some(key.as_str()),
            _ => None,
        })
    }
}
