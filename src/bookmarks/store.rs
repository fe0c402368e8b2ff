//! Bookmark store
//!
//! Append-only text file of bookmark records. Loading filters out entries
//! whose path no longer exists but never rewrites the file to drop them.
//! There is no locking; a single writing process is assumed.

use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::bookmarks::record::{self, Bookmark};
use crate::error::BookmarkError;

/// What a load found.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Live bookmarks in file order.
    pub bookmarks: Vec<Bookmark>,
    /// Lines that could not be decoded, as `MalformedRecord` errors.
    pub malformed: Vec<BookmarkError>,
    /// Well-formed records skipped because their path is gone, in file order.
    pub stale: Vec<Bookmark>,
}

#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
}

impl BookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty store file if absent.
    pub fn ensure(&self) -> Result<(), BookmarkError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&self.path)?;
        Ok(())
    }

    pub fn load(&self) -> Result<LoadReport, BookmarkError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadReport::default()),
            Err(e) => return Err(e.into()),
        };

        let mut report = LoadReport::default();
        for (idx, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let text = String::from_utf8_lossy(raw);
            let line = text.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            match record::decode(line, idx + 1) {
                Ok(bookmark) if Path::new(&bookmark.path).exists() => {
                    report.bookmarks.push(bookmark)
                }
                Ok(bookmark) => {
                    debug!("Skipping stale bookmark {:?} -> {}", bookmark.name, bookmark.path);
                    report.stale.push(bookmark);
                }
                Err(e) => {
                    warn!("{} in {}", e, self.path.display());
                    report.malformed.push(e);
                }
            }
        }

        Ok(report)
    }

    /// Appends one record with a single write.
    pub fn append(&self, name: &str, path: &str) -> Result<Bookmark, BookmarkError> {
        let bookmark = Bookmark::new(name, path);
        let line = record::encode(&bookmark)?;

        self.ensure()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;

        info!("Bookmarked {:?} -> {}", name, path);
        Ok(bookmark)
    }

    /// Rewrites the store without the first record equal to `bookmark`.
    ///
    /// Every other line, stale or malformed, is kept as is. Returns whether a
    /// record was removed.
    pub fn remove(&self, bookmark: &Bookmark) -> Result<bool, BookmarkError> {
        let contents = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let mut kept = Vec::with_capacity(contents.len());
        let mut removed = false;
        for (idx, raw) in contents.split_inclusive(|b| *b == b'\n').enumerate() {
            if !removed {
                let text = String::from_utf8_lossy(raw);
                let line = text.trim_end_matches(['\n', '\r']);
                if record::decode(line, idx + 1).is_ok_and(|b| &b == bookmark) {
                    removed = true;
                    continue;
                }
            }
            kept.extend_from_slice(raw);
        }

        if !removed {
            return Ok(false);
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);
        fs::write(&tmp, &kept)?;
        fs::rename(&tmp, &self.path)?;

        info!("Removed bookmark {:?} -> {}", bookmark.name, bookmark.path);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> BookmarkStore {
        BookmarkStore::new(dir.join("config/astrum/bookmarks"))
    }

    #[test]
    fn test_missing_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let report = store_in(dir.path()).load().unwrap();
        assert!(report.bookmarks.is_empty());
        assert!(report.malformed.is_empty());
    }

    #[test]
    fn test_ensure_creates_parent_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.ensure().unwrap();
        assert_eq!(fs::read(store.path()).unwrap(), b"");
    }

    #[test]
    fn test_append_then_load_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x");
        fs::create_dir(&target).unwrap();
        let target = target.to_str().unwrap();
        let store = store_in(dir.path());

        store.append("Home", dir.path().to_str().unwrap()).unwrap();
        store.append("Work", target).unwrap();
        store.append("Work", target).unwrap();

        let names: Vec<_> = store
            .load()
            .unwrap()
            .bookmarks
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["Home", "Work", "Work"]);
    }

    #[test]
    fn test_stale_entries_pruned_without_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x");
        fs::create_dir(&target).unwrap();
        let store = store_in(dir.path());
        store.append("Work", target.to_str().unwrap()).unwrap();

        fs::remove_dir(&target).unwrap();
        let before = fs::read(store.path()).unwrap();
        let report = store.load().unwrap();

        assert!(report.bookmarks.is_empty());
        assert_eq!(report.stale, vec![Bookmark::new("Work", target.to_str().unwrap())]);
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_malformed_lines_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.ensure().unwrap();
        let live = dir.path().to_str().unwrap();
        fs::write(
            store.path(),
            format!("garbage\nGood|{live}\n\nbad|a|b\r\nAlso|{live}\r\n"),
        )
        .unwrap();

        let report = store.load().unwrap();
        let names: Vec<_> = report.bookmarks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Good", "Also"]);
        assert_eq!(report.malformed.len(), 2);
        assert!(matches!(
            report.malformed[0],
            BookmarkError::MalformedRecord { line: 1, .. }
        ));
        assert!(matches!(
            report.malformed[1],
            BookmarkError::MalformedRecord { line: 4, .. }
        ));
    }

    #[test]
    fn test_append_rejects_delimiter_in_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(matches!(
            store.append("a|b", "/tmp"),
            Err(BookmarkError::InvalidName(_))
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_remove_first_match_only() {
        let dir = tempfile::tempdir().unwrap();
        let live = dir.path().to_str().unwrap();
        let store = store_in(dir.path());
        store.append("A", live).unwrap();
        store.append("B", "/no/longer/here").unwrap();
        store.append("A", live).unwrap();

        assert!(store.remove(&Bookmark::new("A", live)).unwrap());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            format!("B|/no/longer/here\nA|{live}\n")
        );
        assert!(!store.remove(&Bookmark::new("C", live)).unwrap());
    }
}
