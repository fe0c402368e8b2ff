//! Path resolution
//!
//! Turns user input into an absolute, existence-checked [`Location`].

use std::fs;
use std::path::{self, Component, Path, PathBuf};

use crate::error::NavigateError;
use crate::permissions::{Access, AccessProbe};

/// An existing path plus the access snapshot taken when it was resolved.
///
/// The snapshot is not refreshed; the filesystem may change underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: PathBuf,
    is_dir: bool,
    readable: bool,
    writable: bool,
}

impl Location {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn readable(&self) -> bool {
        self.readable
    }

    pub fn writable(&self) -> bool {
        self.writable
    }
}

impl AsRef<Path> for Location {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Resolves `raw` against the current directory without touching symlinks.
///
/// `.` and `..` are collapsed lexically, so `a/link/..` is `a` even when
/// `link` points elsewhere. The path is accepted iff it exists right now.
pub fn resolve(raw: &str, probe: &dyn AccessProbe) -> Result<Location, NavigateError> {
    if raw.is_empty() {
        return Err(NavigateError::NotFound(raw.to_string()));
    }

    let path = path::absolute(raw)
        .map(|p| normalize(&p))
        .map_err(|_| NavigateError::NotFound(raw.to_string()))?;
    let meta = fs::metadata(&path).map_err(|_| NavigateError::NotFound(raw.to_string()))?;

    Ok(Location {
        is_dir: meta.is_dir(),
        readable: probe.check(&path, Access::Read),
        writable: probe.check(&path, Access::Write),
        path,
    })
}

/// Drops `.` and folds each `..` into the component before it. `..` at the
/// root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::testing::DenyProbe;

    #[test]
    fn test_resolve_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().to_str().unwrap();

        let location = resolve(raw, &DenyProbe::default()).unwrap();
        assert_eq!(location.path(), dir.path());
        assert!(location.is_dir());
        assert!(location.readable());
        assert!(location.writable());
    }

    #[test]
    fn test_resolve_snapshot_reflects_probe() {
        let dir = tempfile::tempdir().unwrap();
        let probe = DenyProbe::default().deny_write(dir.path());

        let location = resolve(dir.path().to_str().unwrap(), &probe).unwrap();
        assert!(location.readable());
        assert!(!location.writable());
    }

    #[test]
    fn test_missing_and_empty_paths_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");

        for raw in ["", missing.to_str().unwrap()] {
            assert!(matches!(
                resolve(raw, &DenyProbe::default()),
                Err(NavigateError::NotFound(_))
            ));
        }
    }

    #[test]
    fn test_resolve_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"a").unwrap();

        let location = resolve(file.to_str().unwrap(), &DenyProbe::default()).unwrap();
        assert!(!location.is_dir());
    }

    #[test]
    fn test_parent_components_collapse() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();

        let raw = dir.path().join("a/b/..");
        let location = resolve(raw.to_str().unwrap(), &DenyProbe::default()).unwrap();
        assert_eq!(location.path(), dir.path().join("a"));

        let raw = dir.path().join("a/./b/../b/..");
        let location = resolve(raw.to_str().unwrap(), &DenyProbe::default()).unwrap();
        assert_eq!(location.path(), dir.path().join("a"));
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/x/./y/../z")), PathBuf::from("/x/z"));
    }
}
