//! Device storage service
//!
//! One entry point over a platform resolver and a permission gate. Every
//! file and folder operation asks the gate first and fails with
//! `PermissionDenied` before touching the filesystem.

use log::warn;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;

use crate::config::{PlatformKind, StorageConfig};
use crate::error::StorageError;
use crate::permission::{PermissionGate, provider_for};
use crate::platform::{PathResolver, WellKnownFolder, backend_for};
use crate::storage::{
    CreationCollisionOption, DeleteMode, FileAccessMode, Folder, NameCollisionOption, StorageFile,
    file_ops, folder_ops,
};

/// Behaviour switches that vary between deployments
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageOptions {
    pub delete_mode: DeleteMode,
}

impl StorageOptions {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            delete_mode: if config.recursive_delete {
                DeleteMode::Recursive
            } else {
                DeleteMode::NonRecursive
            },
        }
    }
}

/// Storage facade handed to callers at startup
#[derive(Clone)]
pub struct DeviceStorage {
    resolver: Arc<dyn PathResolver>,
    gate: PermissionGate,
    options: StorageOptions,
}

impl DeviceStorage {
    pub fn new(
        resolver: Arc<dyn PathResolver>,
        gate: PermissionGate,
        options: StorageOptions,
    ) -> Self {
        Self {
            resolver,
            gate,
            options,
        }
    }

    /// Wire the configured backend and permission provider together
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            backend_for(config),
            PermissionGate::new(provider_for(config.permission)),
            StorageOptions::from_config(config),
        )
    }

    pub fn platform(&self) -> PlatformKind {
        self.resolver.platform()
    }

    /// Resolve a well-known folder; `Ok(None)` when the platform lacks it
    pub async fn folder(&self, kind: WellKnownFolder) -> Result<Option<Folder>, StorageError> {
        self.resolver.resolve(kind).await
    }

    pub async fn downloads(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::Downloads).await
    }

    pub async fn music(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::Music).await
    }

    pub async fn pictures(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::Pictures).await
    }

    pub async fn documents(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::Documents).await
    }

    pub async fn movies(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::Movies).await
    }

    pub async fn camera_roll(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::CameraRoll).await
    }

    pub async fn home(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::Home).await
    }

    pub async fn sd_card(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::SDCard).await
    }

    pub async fn root(&self) -> Result<Option<Folder>, StorageError> {
        self.folder(WellKnownFolder::Root).await
    }

    /// Snapshot an arbitrary existing directory
    pub async fn folder_from_path(&self, path: impl AsRef<Path>) -> Result<Folder, StorageError> {
        self.ensure_access().await?;
        Folder::from_path(path).await
    }

    /// Snapshot an arbitrary existing file
    pub async fn file_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<StorageFile, StorageError> {
        self.ensure_access().await?;
        StorageFile::from_path(path).await
    }

    pub async fn list_files(&self, folder: &Folder) -> Result<Vec<StorageFile>, StorageError> {
        self.ensure_access().await?;
        folder_ops::list_files(folder).await
    }

    pub async fn list_folders(&self, folder: &Folder) -> Result<Vec<Folder>, StorageError> {
        self.ensure_access().await?;
        folder_ops::list_folders(folder).await
    }

    pub async fn get_file(&self, folder: &Folder, name: &str) -> Result<StorageFile, StorageError> {
        self.ensure_access().await?;
        folder_ops::get_file(folder, name).await
    }

    pub async fn get_folder(&self, folder: &Folder, name: &str) -> Result<Folder, StorageError> {
        self.ensure_access().await?;
        folder_ops::get_folder(folder, name).await
    }

    pub async fn create_file(
        &self,
        folder: &Folder,
        name: &str,
        option: CreationCollisionOption,
    ) -> Result<StorageFile, StorageError> {
        self.ensure_access().await?;
        folder_ops::create_file(folder, name, option).await
    }

    /// Create a file, failing if the name is taken
    pub async fn create_file_default(
        &self,
        folder: &Folder,
        name: &str,
    ) -> Result<StorageFile, StorageError> {
        self.create_file(folder, name, CreationCollisionOption::FailIfExists)
            .await
    }

    pub async fn create_folder(
        &self,
        folder: &Folder,
        name: &str,
        option: CreationCollisionOption,
    ) -> Result<Folder, StorageError> {
        self.ensure_access().await?;
        folder_ops::create_folder(folder, name, option).await
    }

    /// Create a folder, failing if the name is taken
    pub async fn create_folder_default(
        &self,
        folder: &Folder,
        name: &str,
    ) -> Result<Folder, StorageError> {
        self.create_folder(folder, name, CreationCollisionOption::FailIfExists)
            .await
    }

    pub async fn delete_folder(&self, folder: &Folder) -> Result<(), StorageError> {
        self.ensure_access().await?;
        folder_ops::delete_folder(folder, self.options.delete_mode).await
    }

    pub async fn copy_to(
        &self,
        file: &StorageFile,
        destination: &Folder,
        new_name: Option<&str>,
        option: NameCollisionOption,
    ) -> Result<StorageFile, StorageError> {
        self.ensure_access().await?;
        file_ops::copy_to(file, destination, new_name, option).await
    }

    pub async fn delete_file(&self, file: &StorageFile) -> Result<(), StorageError> {
        self.ensure_access().await?;
        file_ops::delete_file(file).await
    }

    /// Open `file`; the caller owns the handle and closes it by dropping it
    pub async fn open(
        &self,
        file: &StorageFile,
        mode: FileAccessMode,
    ) -> Result<File, StorageError> {
        self.ensure_access().await?;
        file_ops::open(file, mode).await
    }

    async fn ensure_access(&self) -> Result<(), StorageError> {
        if self.gate.request_access().await {
            Ok(())
        } else {
            warn!("Storage operation refused: permission not granted");
            Err(StorageError::PermissionDenied(
                "storage access not granted".into(),
            ))
        }
    }
}
