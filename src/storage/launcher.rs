//! Hands files to the desktop's default application.

use log::{error, info};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct Launcher {
    opener: String,
}

impl Launcher {
    pub fn new(opener: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
        }
    }

    pub fn opener(&self) -> &str {
        &self.opener
    }

    /// Starts the opener for `path` without waiting for it.
    pub fn open(&self, path: &Path) -> Result<(), StorageError> {
        match Command::new(&self.opener)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                info!("Opened {} with {} (pid {})", path.display(), self.opener, child.id());
                Ok(())
            }
            Err(e) => {
                error!("Failed to open {} with {}: {}", path.display(), self.opener, e);
                Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_opener_is_an_io_error() {
        let launcher = Launcher::new("/definitely/not/an/opener");
        let err = launcher.open(Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_open_spawns_opener() {
        assert!(Launcher::new("true").open(Path::new("/tmp")).is_ok());
    }
}
