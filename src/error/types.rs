//! Error types
//!
//! Every filesystem-boundary failure surfaces as one of these kinds.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Storage errors
#[derive(Debug)]
pub enum StorageError {
    PermissionDenied(String),
    NotFound(PathBuf),
    DirectoryNotFound(PathBuf),
    AlreadyExists(PathBuf),
    CopyFailed(PathBuf),
    DeleteFailed(PathBuf),
    InvalidName(String),
    Unsupported(String),
    Io(io::Error),
    Config(String),
}

impl StorageError {
    /// Map an I/O error raised while touching `path` to a storage error kind.
    ///
    /// `missing` decides which not-found kind a vanished path turns into.
    pub fn from_io(error: io::Error, path: &Path, missing: MissingKind) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => match missing {
                MissingKind::File => StorageError::NotFound(path.to_path_buf()),
                MissingKind::Directory => StorageError::DirectoryNotFound(path.to_path_buf()),
            },
            io::ErrorKind::PermissionDenied => {
                StorageError::PermissionDenied(path.display().to_string())
            }
            io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_path_buf()),
            _ => StorageError::Io(error),
        }
    }

    /// True for both the file and the directory flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::NotFound(_) | StorageError::DirectoryNotFound(_)
        )
    }
}

/// Which entry kind a not-found I/O error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKind {
    File,
    Directory,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PermissionDenied(p) => write!(f, "Permission denied: {}", p),
            StorageError::NotFound(p) => write!(f, "File not found: {}", p.display()),
            StorageError::DirectoryNotFound(p) => {
                write!(f, "Directory not found: {}", p.display())
            }
            StorageError::AlreadyExists(p) => write!(f, "Already exists: {}", p.display()),
            StorageError::CopyFailed(p) => write!(f, "Copy failed: {}", p.display()),
            StorageError::DeleteFailed(p) => write!(f, "Delete failed: {}", p.display()),
            StorageError::InvalidName(n) => write!(f, "Invalid name: {:?}", n),
            StorageError::Unsupported(what) => write!(f, "Unsupported: {}", what),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

impl From<config::ConfigError> for StorageError {
    fn from(error: config::ConfigError) -> Self {
        StorageError::Config(error.to_string())
    }
}
