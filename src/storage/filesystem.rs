//! File system checks
//!
//! Existence checks shared by the folder and file operations.

use std::path::Path;

use crate::error::StorageError;

/// Check if a regular file exists at `path`
pub async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Check if a directory exists at `path`
pub async fn directory_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Check if anything exists at `path`
pub async fn entry_exists(path: &Path) -> bool {
    tokio::fs::symlink_metadata(path).await.is_ok()
}

/// True when both paths resolve to the same entry on disk.
///
/// Paths that cannot be resolved are never the same entry.
pub async fn same_entry(a: &Path, b: &Path) -> bool {
    match (
        tokio::fs::canonicalize(a).await,
        tokio::fs::canonicalize(b).await,
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Fail with `DirectoryNotFound` unless `path` is an existing directory
pub async fn require_directory(path: &Path) -> Result<(), StorageError> {
    if directory_exists(path).await {
        Ok(())
    } else {
        Err(StorageError::DirectoryNotFound(path.to_path_buf()))
    }
}

/// Fail with `NotFound` unless `path` is an existing file
pub async fn require_file(path: &Path) -> Result<(), StorageError> {
    if file_exists(path).await {
        Ok(())
    } else {
        Err(StorageError::NotFound(path.to_path_buf()))
    }
}
