//! Access probing
//!
//! Answers whether the current process may read or write a path.

use log::debug;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Kind of access an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    fn mode(self) -> libc::c_int {
        match self {
            Access::Read => libc::R_OK,
            Access::Write => libc::W_OK,
        }
    }
}

/// Source of truth for access checks.
///
/// The host implementation asks the kernel; tests substitute their own to
/// simulate cleared mode bits regardless of the uid they run under.
pub trait AccessProbe {
    fn check(&self, path: &Path, access: Access) -> bool;
}

/// Checks effective permissions of this process with `faccessat(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl AccessProbe for HostProbe {
    fn check(&self, path: &Path, access: Access) -> bool {
        let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
            return false;
        };

        let rc = unsafe {
            libc::faccessat(libc::AT_FDCWD, c_path.as_ptr(), access.mode(), libc::AT_EACCESS)
        };
        let granted = rc == 0;
        debug!("access {:?} on {}: {}", access, path.display(), granted);
        granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_probe_reads_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(HostProbe.check(dir.path(), Access::Read));
        assert!(HostProbe.check(dir.path(), Access::Write));
    }

    #[test]
    fn test_host_probe_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(!HostProbe.check(&missing, Access::Read));
    }
}
