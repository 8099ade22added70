//! Folder operations
//!
//! Listing, lookup, creation and deletion relative to a `Folder` snapshot.
//! Each call re-validates the folder against the filesystem.

use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{MissingKind, StorageError};
use crate::storage::collision::{self, CollisionAction, CreationCollisionOption};
use crate::storage::entry::{Folder, StorageFile};
use crate::storage::filesystem::{
    directory_exists, entry_exists, file_exists, require_directory,
};
use crate::storage::validation::validate_name;

/// How a folder delete treats its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Only empty folders can be deleted
    #[default]
    NonRecursive,
    /// The folder and everything below it is removed
    Recursive,
}

/// Lists the files directly inside `folder`, in enumeration order
pub async fn list_files(folder: &Folder) -> Result<Vec<StorageFile>, StorageError> {
    let mut files = Vec::new();
    for path in list_children(folder, EntryKind::File).await? {
        match StorageFile::from_path(&path).await {
            Ok(file) => files.push(file),
            // removed between enumeration and snapshot
            Err(e) if e.is_not_found() => debug!("Skipping vanished file {}", path.display()),
            Err(e) => return Err(e),
        }
    }

    info!(
        "Listed {} files in {}",
        files.len(),
        folder.full_path().display()
    );
    Ok(files)
}

/// Lists the folders directly inside `folder`, in enumeration order
pub async fn list_folders(folder: &Folder) -> Result<Vec<Folder>, StorageError> {
    let folders: Vec<Folder> = list_children(folder, EntryKind::Directory)
        .await?
        .into_iter()
        .map(Folder::new)
        .collect();

    info!(
        "Listed {} folders in {}",
        folders.len(),
        folder.full_path().display()
    );
    Ok(folders)
}

/// Looks up the file `name` inside `folder`
pub async fn get_file(folder: &Folder, name: &str) -> Result<StorageFile, StorageError> {
    let name = validate_name(name)?;
    require_directory(folder.full_path()).await?;

    debug!("Looking up file {} in {}", name, folder.full_path().display());
    StorageFile::from_path(folder.child(name)).await
}

/// Looks up the folder `name` inside `folder`
pub async fn get_folder(folder: &Folder, name: &str) -> Result<Folder, StorageError> {
    let name = validate_name(name)?;
    require_directory(folder.full_path()).await?;

    debug!(
        "Looking up folder {} in {}",
        name,
        folder.full_path().display()
    );
    Folder::from_path(folder.child(name)).await
}

/// Creates an empty file `name` inside `folder`
pub async fn create_file(
    folder: &Folder,
    name: &str,
    option: CreationCollisionOption,
) -> Result<StorageFile, StorageError> {
    let name = validate_name(name)?;
    require_directory(folder.full_path()).await?;

    let exists = entry_exists(&folder.child(name)).await;
    let path = match collision::resolve(folder.full_path(), name, option, exists) {
        CollisionAction::Fail(path) => return Err(StorageError::AlreadyExists(path)),
        CollisionAction::Open(path) => {
            debug!("Opening existing file {}", path.display());
            return StorageFile::from_path(&path)
                .await
                .map_err(|_| StorageError::AlreadyExists(path));
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

    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
        .map_err(|e| create_error(e, folder, &path))?;
    drop(file);

    info!("Created file {} ({:?})", path.display(), option);
    StorageFile::from_path(&path).await
}

/// Creates the folder `name` inside `folder`
pub async fn create_folder(
    folder: &Folder,
    name: &str,
    option: CreationCollisionOption,
) -> Result<Folder, StorageError> {
    let name = validate_name(name)?;
    require_directory(folder.full_path()).await?;

    let exists = entry_exists(&folder.child(name)).await;
    let path = match collision::resolve(folder.full_path(), name, option, exists) {
        CollisionAction::Fail(path) => return Err(StorageError::AlreadyExists(path)),
        CollisionAction::Open(path) => {
            debug!("Opening existing folder {}", path.display());
            return Folder::from_path(&path)
                .await
                .map_err(|_| StorageError::AlreadyExists(path));
        }
        CollisionAction::Replace(path) => {
            if !directory_exists(&path).await {
                return Err(StorageError::AlreadyExists(path));
            }
            fs::remove_dir_all(&path)
                .await
                .map_err(|e| StorageError::from_io(e, &path, MissingKind::Directory))?;
            path
        }
        CollisionAction::Create(path) => path,
    };

    fs::create_dir(&path)
        .await
        .map_err(|e| create_error(e, folder, &path))?;

    info!("Created folder {} ({:?})", path.display(), option);
    Folder::from_path(&path).await
}

/// Deletes `folder` from disk
pub async fn delete_folder(folder: &Folder, mode: DeleteMode) -> Result<(), StorageError> {
    let path = folder.full_path();
    require_directory(path).await?;

    let result = match mode {
        DeleteMode::NonRecursive => fs::remove_dir(path).await,
        DeleteMode::Recursive => fs::remove_dir_all(path).await,
    };

    if let Err(e) = result {
        warn!("Failed to delete folder {}: {}", path.display(), e);
        return Err(match StorageError::from_io(e, path, MissingKind::Directory) {
            err @ (StorageError::DirectoryNotFound(_) | StorageError::PermissionDenied(_)) => err,
            _ => StorageError::DeleteFailed(path.to_path_buf()),
        });
    }

    if entry_exists(path).await {
        warn!("Folder {} still present after delete", path.display());
        return Err(StorageError::DeleteFailed(path.to_path_buf()));
    }

    info!("Deleted folder {} ({:?})", path.display(), mode);
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
}

async fn list_children(folder: &Folder, kind: EntryKind) -> Result<Vec<PathBuf>, StorageError> {
    let root = folder.full_path();
    let mut entries = fs::read_dir(root)
        .await
        .map_err(|e| StorageError::from_io(e, root, MissingKind::Directory))?;

    let mut children = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // follow symlinks so linked entries list like their targets
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            // dangling symlink, or removed since enumeration
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Skipping vanished entry {}", path.display());
                continue;
            }
            Err(e) => return Err(StorageError::from_io(e, &path, MissingKind::File)),
        };

        let wanted = match kind {
            EntryKind::File => metadata.is_file(),
            EntryKind::Directory => metadata.is_dir(),
        };
        if wanted {
            children.push(path);
        }
    }
    Ok(children)
}

/// A create that hits a vanished parent reports the parent, anything else the target
fn create_error(error: std::io::Error, parent: &Folder, target: &Path) -> StorageError {
    if error.kind() == std::io::ErrorKind::NotFound {
        StorageError::DirectoryNotFound(parent.full_path().to_path_buf())
    } else {
        StorageError::from_io(error, target, MissingKind::File)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn temp_folder() -> (tempfile::TempDir, Folder) {
        let dir = tempfile::tempdir().unwrap();
        let folder = Folder::from_path(dir.path()).await.unwrap();
        (dir, folder)
    }

    #[tokio::test]
    async fn lists_direct_children_by_kind() {
        let (dir, folder) = temp_folder().await;
        std::fs::write(dir.path().join("x.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("y.txt"), b"y").unwrap();
        std::fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        std::fs::write(dir.path().join("sub/nested.txt"), b"n").unwrap();

        let names: HashSet<String> = list_files(&folder)
            .await
            .unwrap()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(names, HashSet::from(["x.txt".to_string(), "y.txt".to_string()]));

        let folders = list_folders(&folder).await.unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name(), "sub");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_symlinks_are_left_out_of_listings() {
        let (dir, folder) = temp_folder().await;
        std::fs::write(dir.path().join("real.txt"), b"r").unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling"))
            .unwrap();

        let files = list_files(&folder).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "real.txt");
        assert!(list_folders(&folder).await.unwrap().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_loops_are_reported_not_skipped() {
        let (dir, folder) = temp_folder().await;
        std::os::unix::fs::symlink(dir.path().join("loop"), dir.path().join("loop")).unwrap();

        assert!(matches!(list_files(&folder).await, Err(StorageError::Io(_))));
    }

    #[tokio::test]
    async fn listing_a_removed_folder_fails() {
        let (dir, folder) = temp_folder().await;
        drop(dir);

        assert!(matches!(
            list_files(&folder).await,
            Err(StorageError::DirectoryNotFound(_))
        ));
        assert!(matches!(
            list_folders(&folder).await,
            Err(StorageError::DirectoryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn get_file_requires_parent_and_target() {
        let (dir, folder) = temp_folder().await;
        assert!(matches!(
            get_file(&folder, "missing.txt").await,
            Err(StorageError::NotFound(_))
        ));

        drop(dir);
        assert!(matches!(
            get_file(&folder, "missing.txt").await,
            Err(StorageError::DirectoryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn get_folder_finds_existing_child() {
        let (dir, folder) = temp_folder().await;
        std::fs::create_dir(dir.path().join("albums")).unwrap();

        let albums = get_folder(&folder, "albums").await.unwrap();
        assert_eq!(albums.name(), "albums");
        assert!(matches!(
            get_folder(&folder, "missing").await,
            Err(StorageError::DirectoryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn create_file_rejects_bad_names_without_side_effects() {
        let (dir, folder) = temp_folder().await;
        let err = create_file(&folder, "../escape.txt", CreationCollisionOption::FailIfExists)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn create_file_where_folder_exists_is_already_exists() {
        let (dir, folder) = temp_folder().await;
        std::fs::create_dir(dir.path().join("taken")).unwrap();

        for option in [
            CreationCollisionOption::FailIfExists,
            CreationCollisionOption::OpenIfExists,
            CreationCollisionOption::ReplaceExisting,
        ] {
            assert!(matches!(
                create_file(&folder, "taken", option).await,
                Err(StorageError::AlreadyExists(_))
            ));
        }
        assert!(dir.path().join("taken").is_dir());
    }

    #[tokio::test]
    async fn replace_existing_folder_drops_contents() {
        let (dir, folder) = temp_folder().await;
        std::fs::create_dir(dir.path().join("cache")).unwrap();
        std::fs::write(dir.path().join("cache/old.bin"), b"old").unwrap();

        let cache = create_folder(&folder, "cache", CreationCollisionOption::ReplaceExisting)
            .await
            .unwrap();
        assert_eq!(cache.name(), "cache");
        assert!(!dir.path().join("cache/old.bin").exists());
    }

    #[tokio::test]
    async fn non_recursive_delete_refuses_non_empty_folder() {
        let (dir, folder) = temp_folder().await;
        let child = create_folder(&folder, "full", CreationCollisionOption::FailIfExists)
            .await
            .unwrap();
        std::fs::write(dir.path().join("full/keep.txt"), b"keep").unwrap();

        assert!(matches!(
            delete_folder(&child, DeleteMode::NonRecursive).await,
            Err(StorageError::DeleteFailed(_))
        ));
        assert!(dir.path().join("full/keep.txt").exists());

        delete_folder(&child, DeleteMode::Recursive).await.unwrap();
        assert!(!dir.path().join("full").exists());
    }
}
