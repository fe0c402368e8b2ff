//! Storage operations
//!
//! Mutating filesystem operations. Callers resolve and permission-check paths
//! first; host failures are reported verbatim.

use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::permissions::{EscalationPolicy, PermissionGate};
use crate::storage::results::{BatchResult, DeleteOutcome, PendingOperation};

/// Creates `parent/name`. Fails if anything already exists under that name.
pub fn create_directory(parent: &Path, name: &str) -> Result<PathBuf, StorageError> {
    let target = child_path(parent, name)?;
    let op = PendingOperation::CreateDirectory {
        parent: parent.to_path_buf(),
        name: name.to_string(),
    };

    fs::create_dir(&target).map_err(|e| {
        error!("Failed to {}: {}", op, e);
        StorageError::from_io(&target, e)
    })?;

    info!("Completed {}", op);
    Ok(target)
}

/// Creates an empty `parent/name`.
///
/// An existing file at that path is truncated to zero length, the same as
/// opening it for writing. Check for existence first if that matters.
pub fn create_file(parent: &Path, name: &str) -> Result<PathBuf, StorageError> {
    let target = child_path(parent, name)?;
    let op = PendingOperation::CreateFile {
        parent: parent.to_path_buf(),
        name: name.to_string(),
    };

    fs::File::create(&target).map_err(|e| {
        error!("Failed to {}: {}", op, e);
        StorageError::from_io(&target, e)
    })?;

    info!("Completed {}", op);
    Ok(target)
}

/// Deletes every path once, in order. Directories go recursively.
///
/// A failure never stops the batch; each item gets its own outcome.
pub fn delete_many<P: AsRef<Path>>(paths: &[P]) -> BatchResult {
    delete_each(paths, delete_one)
}

/// `delete_many`, then, under `RetryElevated`, one more attempt through the
/// escalation bridge for each item the host refused for lack of permission.
pub fn delete_many_with_policy<P: AsRef<Path>>(
    paths: &[P],
    gate: &PermissionGate,
    policy: EscalationPolicy,
) -> BatchResult {
    let mut batch = delete_each(paths, delete_one);
    retry_denied(&mut batch, gate, policy);
    batch
}

fn delete_each<P, F>(paths: &[P], mut delete: F) -> BatchResult
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<(), StorageError>,
{
    let total = paths.len();
    let mut batch = BatchResult::default();

    for (index, path) in paths.iter().enumerate() {
        let target = path.as_ref().to_path_buf();
        let op = PendingOperation::Delete {
            target: target.clone(),
            index,
            total,
        };

        let outcome = match delete(&target) {
            Ok(()) => {
                info!("Completed {}", op);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("Failed to {}: {}", op, e);
                DeleteOutcome::Failed(e)
            }
        };
        batch.outcomes.push((target, outcome));
    }

    batch
}

fn retry_denied(batch: &mut BatchResult, gate: &PermissionGate, policy: EscalationPolicy) {
    if policy == EscalationPolicy::Never || !gate.has_bridge() {
        return;
    }

    for (path, outcome) in batch.outcomes.iter_mut() {
        let denied = matches!(outcome, DeleteOutcome::Failed(e) if e.is_permission_denied());
        if !denied {
            continue;
        }

        warn!("Retrying delete of {} with elevated rights", path.display());
        *outcome = match gate.run_privileged(&elevated_delete_argv(path)) {
            Ok(_) => DeleteOutcome::Deleted,
            Err(e) => DeleteOutcome::Failed(StorageError::EscalationFailed(e)),
        };
    }
}

fn elevated_delete_argv(path: &Path) -> Vec<String> {
    vec![
        "rm".to_string(),
        "-rf".to_string(),
        "--".to_string(),
        path.to_string_lossy().into_owned(),
    ]
}

fn delete_one(target: &Path) -> Result<(), StorageError> {
    // Symlinks are removed themselves, never followed into.
    let meta = fs::symlink_metadata(target).map_err(|e| StorageError::from_io(target, e))?;

    let result = if meta.is_dir() {
        fs::remove_dir_all(target)
    } else {
        fs::remove_file(target)
    };
    result.map_err(|e| StorageError::from_io(target, e))
}

fn child_path(parent: &Path, name: &str) -> Result<PathBuf, StorageError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(parent.join(name))
}
