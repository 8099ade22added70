//! File operations
//!
//! Copy, delete and open relative to a `StorageFile` snapshot.

use log::{debug, info, warn};
use std::path::PathBuf;
use tokio::fs;

use crate::error::{MissingKind, StorageError};
use crate::storage::collision::{self, CollisionAction, NameCollisionOption};
use crate::storage::entry::{Folder, StorageFile};
use crate::storage::filesystem::{
    entry_exists, file_exists, require_directory, require_file, same_entry,
};
use crate::storage::validation::validate_name;

/// How a file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccessMode {
    Read,
    Write,
}

/// Copies `file` into `destination`, under `new_name` or its own name
pub async fn copy_to(
    file: &StorageFile,
    destination: &Folder,
    new_name: Option<&str>,
    option: NameCollisionOption,
) -> Result<StorageFile, StorageError> {
    let source = file.full_path();
    require_file(source).await?;

    let name = validate_name(new_name.unwrap_or(file.name()))?;
    require_directory(destination.full_path()).await?;

    let existing = destination.child(name);
    let exists = entry_exists(&existing).await;
    // the destination may spell the source's own path differently
    let is_source = exists && same_entry(&existing, source).await;

    let target = match collision::resolve(destination.full_path(), name, option.into(), exists) {
        CollisionAction::Fail(path) => return Err(StorageError::AlreadyExists(path)),
        CollisionAction::Open(path) => return StorageFile::from_path(&path).await,
        CollisionAction::Replace(path) if is_source => {
            debug!("Copy of {} onto itself, nothing to do", source.display());
            return StorageFile::from_path(&path).await;
        }
        CollisionAction::Replace(path) => {
            if !file_exists(&path).await {
                return Err(StorageError::AlreadyExists(path));
            }
            fs::remove_file(&path)
                .await
                .map_err(|e| StorageError::from_io(e, &path, MissingKind::File))?;
            path
        }
        CollisionAction::Create(path) => path,
    };

    let bytes = fs::copy(source, &target).await.map_err(|e| {
        warn!(
            "Failed to copy {} to {}: {}",
            source.display(),
            target.display(),
            e
        );
        match StorageError::from_io(e, source, MissingKind::File) {
            err @ (StorageError::NotFound(_) | StorageError::PermissionDenied(_)) => err,
            _ => StorageError::CopyFailed(target.clone()),
        }
    })?;

    info!(
        "Copied {} to {} ({} bytes, {:?})",
        source.display(),
        target.display(),
        bytes,
        option
    );
    verify_copy(target).await
}

/// Snapshot a copy target, failing with `CopyFailed` if it is not there
async fn verify_copy(target: PathBuf) -> Result<StorageFile, StorageError> {
    if !file_exists(&target).await {
        warn!("Copy target {} missing after copy", target.display());
        return Err(StorageError::CopyFailed(target));
    }

    StorageFile::from_path(&target)
        .await
        .map_err(|_| StorageError::CopyFailed(target))
}

/// Deletes `file` from disk
pub async fn delete_file(file: &StorageFile) -> Result<(), StorageError> {
    let path = file.full_path();
    require_file(path).await?;

    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to delete file {}: {}", path.display(), e);
        return Err(match StorageError::from_io(e, path, MissingKind::File) {
            err @ (StorageError::NotFound(_) | StorageError::PermissionDenied(_)) => err,
            _ => StorageError::DeleteFailed(path.to_path_buf()),
        });
    }

    if entry_exists(path).await {
        warn!("File {} still present after delete", path.display());
        return Err(StorageError::DeleteFailed(path.to_path_buf()));
    }

    info!("Deleted file {}", path.display());
    Ok(())
}

/// Opens `file` positioned at its start.
///
/// The returned handle is owned by the caller and closed when dropped.
/// Write mode does not truncate; bytes past what is written are kept.
pub async fn open(file: &StorageFile, mode: FileAccessMode) -> Result<fs::File, StorageError> {
    let path = file.full_path();
    require_file(path).await?;

    let handle = match mode {
        FileAccessMode::Read => fs::File::open(path).await,
        FileAccessMode::Write => fs::OpenOptions::new().write(true).open(path).await,
    }
    .map_err(|e| StorageError::from_io(e, path, MissingKind::File))?;

    debug!("Opened {} for {:?}", path.display(), mode);
    Ok(handle)
}
