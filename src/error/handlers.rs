//! Error handlers
//!
//! Maps module errors onto the user-facing error taxonomy.

use crate::error::types::{AstrumError, NavigateError, PermissionError, StorageError};
use log::error;

/// Error categories the presentation layer distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    EscalationFailed,
    IoError,
    MalformedBookmarkRecord,
}

/// Log an error
pub fn handle_error(err: &AstrumError) {
    error!("{} ({:?})", err, error_kind(err));
}

/// Classify an error for display
pub fn error_kind(err: &AstrumError) -> ErrorKind {
    match err {
        AstrumError::Navigate(e) => match e {
            NavigateError::NotFound(_) => ErrorKind::NotFound,
            NavigateError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            NavigateError::EscalationFailed(_) => ErrorKind::EscalationFailed,
            NavigateError::NoPendingEscalation => ErrorKind::EscalationFailed,
        },
        AstrumError::Storage(e) => storage_error_kind(e),
        AstrumError::Permission(PermissionError::BridgeUnavailable) => ErrorKind::PermissionDenied,
        AstrumError::Permission(_) => ErrorKind::EscalationFailed,
        AstrumError::Bookmark(crate::error::BookmarkError::MalformedRecord { .. }) => {
            ErrorKind::MalformedBookmarkRecord
        }
        AstrumError::Bookmark(_) => ErrorKind::IoError,
        AstrumError::Config(_) => ErrorKind::IoError,
    }
}

/// Classify a storage error without wrapping it
pub fn storage_error_kind(err: &StorageError) -> ErrorKind {
    match err {
        StorageError::NotFound(_) => ErrorKind::NotFound,
        StorageError::EscalationFailed(_) => ErrorKind::EscalationFailed,
        StorageError::InvalidName(_) | StorageError::Io { .. } => ErrorKind::IoError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookmarkError;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_storage_errors_map_to_io_or_not_found() {
        let missing = StorageError::from_io("/gone", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(error_kind(&missing.into()), ErrorKind::NotFound);

        let denied =
            StorageError::from_io("/root", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(denied.is_permission_denied());
        assert_eq!(error_kind(&denied.into()), ErrorKind::IoError);
    }

    #[test]
    fn test_navigation_and_bookmark_kinds() {
        let denied = NavigateError::PermissionDenied(PathBuf::from("/root"));
        assert_eq!(error_kind(&denied.into()), ErrorKind::PermissionDenied);

        let malformed = BookmarkError::MalformedRecord {
            line: 3,
            content: "garbage".into(),
        };
        assert_eq!(
            error_kind(&malformed.into()),
            ErrorKind::MalformedBookmarkRecord
        );

        let failed = PermissionError::EscalationFailed {
            program: "pkexec".into(),
            message: "dismissed".into(),
        };
        assert_eq!(error_kind(&failed.into()), ErrorKind::EscalationFailed);
    }
}
