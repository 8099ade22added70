//! Error handlers
//!
//! Reporting helpers for the command-line front end.

use crate::error::types::StorageError;
use log::error;

/// Log a storage error
pub fn handle_error(err: &StorageError) {
    error!("Device storage error: {}", err);
}

/// Convert error to a process exit code
pub fn error_to_exit_code(err: &StorageError) -> u8 {
    match err {
        StorageError::PermissionDenied(_) => 77,
        StorageError::NotFound(_) => 66,
        StorageError::DirectoryNotFound(_) => 66,
        StorageError::AlreadyExists(_) => 73,
        StorageError::CopyFailed(_) => 74,
        StorageError::DeleteFailed(_) => 74,
        StorageError::InvalidName(_) => 65,
        StorageError::Unsupported(_) => 69,
        StorageError::Io(_) => 74,
        StorageError::Config(_) => 78,
    }
}
