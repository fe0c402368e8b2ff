//! Error types
//!
//! Defines domain-specific error types for each module of the file manager core.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Navigation module errors
#[derive(Debug)]
pub enum NavigateError {
    NotFound(String),
    PermissionDenied(PathBuf),
    EscalationFailed(PermissionError),
    NoPendingEscalation,
}

impl fmt::Display for NavigateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateError::NotFound(p) => write!(f, "Path not found: {}", p),
            NavigateError::PermissionDenied(p) => {
                write!(f, "Permission denied: {}", p.display())
            }
            NavigateError::EscalationFailed(e) => write!(f, "{}", e),
            NavigateError::NoPendingEscalation => write!(f, "No escalation is pending"),
        }
    }
}

impl std::error::Error for NavigateError {}

impl From<PermissionError> for NavigateError {
    fn from(error: PermissionError) -> Self {
        NavigateError::EscalationFailed(error)
    }
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    NotFound(PathBuf),
    InvalidName(String),
    Io { path: PathBuf, source: io::Error },
    EscalationFailed(PermissionError),
}

impl StorageError {
    /// Wraps a host I/O error, keeping `NotFound` distinguishable.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(path)
        } else {
            StorageError::Io { path, source }
        }
    }

    /// Whether the host refused the operation for lack of permission.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            StorageError::Io { source, .. } if source.kind() == io::ErrorKind::PermissionDenied
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(p) => write!(f, "No such file or directory: {}", p.display()),
            StorageError::InvalidName(n) => write!(f, "Invalid name: {:?}", n),
            StorageError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            StorageError::EscalationFailed(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            StorageError::EscalationFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// Permission gate and escalation bridge errors
#[derive(Debug, Clone, PartialEq)]
pub enum PermissionError {
    BridgeUnavailable,
    EmptyCommand,
    EscalationFailed { program: String, message: String },
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::BridgeUnavailable => write!(f, "No privilege escalation helper configured"),
            PermissionError::EmptyCommand => write!(f, "Escalation requested with an empty command"),
            PermissionError::EscalationFailed { program, message } => {
                write!(f, "Escalation via {} failed: {}", program, message)
            }
        }
    }
}

impl std::error::Error for PermissionError {}

/// Bookmark store errors
#[derive(Debug)]
pub enum BookmarkError {
    InvalidName(String),
    InvalidPath(String),
    MalformedRecord { line: usize, content: String },
    Io(io::Error),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::InvalidName(n) => write!(f, "Invalid bookmark name: {:?}", n),
            BookmarkError::InvalidPath(p) => write!(f, "Invalid bookmark path: {:?}", p),
            BookmarkError::MalformedRecord { line, content } => {
                write!(f, "Malformed bookmark record at line {}: {:?}", line, content)
            }
            BookmarkError::Io(e) => write!(f, "Bookmark store I/O error: {}", e),
        }
    }
}

impl std::error::Error for BookmarkError {}

impl From<io::Error> for BookmarkError {
    fn from(error: io::Error) -> Self {
        BookmarkError::Io(error)
    }
}

/// General error that encompasses all module error types
#[derive(Debug)]
pub enum AstrumError {
    Navigate(NavigateError),
    Storage(StorageError),
    Permission(PermissionError),
    Bookmark(BookmarkError),
    Config(config::ConfigError),
}

impl fmt::Display for AstrumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstrumError::Navigate(e) => write!(f, "Navigation error: {}", e),
            AstrumError::Storage(e) => write!(f, "Storage error: {}", e),
            AstrumError::Permission(e) => write!(f, "Permission error: {}", e),
            AstrumError::Bookmark(e) => write!(f, "Bookmark error: {}", e),
            AstrumError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for AstrumError {}

impl From<NavigateError> for AstrumError {
    fn from(error: NavigateError) -> Self {
        AstrumError::Navigate(error)
    }
}

impl From<StorageError> for AstrumError {
    fn from(error: StorageError) -> Self {
        AstrumError::Storage(error)
    }
}

impl From<PermissionError> for AstrumError {
    fn from(error: PermissionError) -> Self {
        AstrumError::Permission(error)
    }
}

impl From<BookmarkError> for AstrumError {
    fn from(error: BookmarkError) -> Self {
        AstrumError::Bookmark(error)
    }
}

impl From<config::ConfigError> for AstrumError {
    fn from(error: config::ConfigError) -> Self {
        AstrumError::Config(error)
    }
}
