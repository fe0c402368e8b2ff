//! Storage result types
//!
//! Defines the structures returned by storage operations.

use crate::error::StorageError;
use std::fmt;
use std::path::{Path, PathBuf};

/// One requested mutation, alive only while it is being serviced.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingOperation {
    CreateDirectory { parent: PathBuf, name: String },
    CreateFile { parent: PathBuf, name: String },
    Delete { target: PathBuf, index: usize, total: usize },
}

impl fmt::Display for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingOperation::CreateDirectory { parent, name } => {
                write!(f, "create directory {:?} in {}", name, parent.display())
            }
            PendingOperation::CreateFile { parent, name } => {
                write!(f, "create file {:?} in {}", name, parent.display())
            }
            PendingOperation::Delete {
                target,
                index,
                total,
            } => write!(f, "delete {} ({}/{})", target.display(), index + 1, total),
        }
    }
}

/// Outcome of deleting one item of a batch.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    Failed(StorageError),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// Per-item outcomes of a batch delete, in input order.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcomes: Vec<(PathBuf, DeleteOutcome)>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn all_deleted(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.is_deleted())
    }

    /// Every failed item, not just the first.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &StorageError)> {
        self.outcomes.iter().filter_map(|(path, outcome)| match outcome {
            DeleteOutcome::Failed(e) => Some((path.as_path(), e)),
            DeleteOutcome::Deleted => None,
        })
    }
}
