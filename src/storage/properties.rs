//! Properties snapshot
//!
//! Everything the properties dialog shows, taken from a single stat of the
//! target. Nothing is cached between requests.

use chrono::{DateTime, Local, Utc};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::storage::format::{format_mode, format_size};
use crate::storage::owner::owner_name;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone)]
pub struct PropertiesSnapshot {
    pub name: String,
    pub parent_dir: PathBuf,
    pub kind: EntryKind,
    /// Only set for regular entries; directories carry no size.
    pub size_bytes: Option<u64>,
    pub permission_bits: u32,
    pub owner: String,
    pub created_at: DateTime<Local>,
    pub modified_at: DateTime<Local>,
    pub accessed_at: DateTime<Local>,
}

impl PropertiesSnapshot {
    pub fn size_display(&self) -> Option<String> {
        self.size_bytes.map(format_size)
    }

    pub fn permissions_display(&self) -> String {
        format_mode(self.permission_bits)
    }

    pub fn kind_display(&self) -> &'static str {
        match self.kind {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
        }
    }

    /// Label/value rows in dialog order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Name", self.name.clone()),
            ("Path", self.parent_dir.display().to_string()),
            ("Type", self.kind_display().to_string()),
        ];
        if let Some(size) = self.size_display() {
            rows.push(("Size", size));
        }
        rows.push(("Permissions", self.permissions_display()));
        rows.push(("Owner", self.owner.clone()));
        rows.push(("Created", self.created_at.format(TIMESTAMP_FORMAT).to_string()));
        rows.push(("Modified", self.modified_at.format(TIMESTAMP_FORMAT).to_string()));
        rows.push(("Accessed", self.accessed_at.format(TIMESTAMP_FORMAT).to_string()));
        rows
    }
}

/// Reads the properties of `path` with one `stat(2)`, following symlinks.
pub fn read_properties(path: &Path) -> Result<PropertiesSnapshot, StorageError> {
    let meta = fs::metadata(path).map_err(|e| StorageError::from_io(path, e))?;

    let kind = if meta.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let parent_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok(PropertiesSnapshot {
        name,
        parent_dir,
        kind,
        size_bytes: (kind == EntryKind::File).then(|| meta.len()),
        permission_bits: meta.mode() & 0o777,
        owner: owner_name(meta.uid()),
        created_at: local_time(meta.ctime(), meta.ctime_nsec()),
        modified_at: local_time(meta.mtime(), meta.mtime_nsec()),
        accessed_at: local_time(meta.atime(), meta.atime_nsec()),
    })
}

fn local_time(secs: i64, nsecs: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp(secs, nsecs.clamp(0, 999_999_999) as u32)
        .unwrap_or_default()
        .with_timezone(&Local)
}
