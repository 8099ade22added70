#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use device_storage::DeviceStorage;
use device_storage::StorageOptions;
use device_storage::permission::{
    PermissionGate, PermissionProvider, StaticPermission, StorageAccess,
};
use device_storage::platform::{ConfiguredFolders, DesktopResolver};
use device_storage::storage::Folder;
use tempfile::TempDir;

/// Desktop layout rooted at a temporary home with the usual library folders
pub struct Fixture {
    pub home: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("tempdir");
        for sub in ["Documents", "Downloads", "Music", "Pictures", "Videos"] {
            std::fs::create_dir(home.path().join(sub)).expect("mkdir");
        }
        Self { home }
    }

    pub fn storage(&self, provider: Arc<dyn PermissionProvider>) -> DeviceStorage {
        self.storage_with(provider, StorageOptions::default())
    }

    pub fn storage_with(
        &self,
        provider: Arc<dyn PermissionProvider>,
        options: StorageOptions,
    ) -> DeviceStorage {
        let folders = ConfiguredFolders::new(Some(self.home.path().to_path_buf()));
        DeviceStorage::new(
            Arc::new(DesktopResolver::new(Arc::new(folders))),
            PermissionGate::new(provider),
            options,
        )
    }

    pub fn granted(&self) -> DeviceStorage {
        self.storage(Arc::new(StaticPermission::granted()))
    }

    pub fn path(&self, relative: &str) -> std::path::PathBuf {
        self.home.path().join(relative)
    }

    pub async fn folder(&self, relative: &str) -> Folder {
        let path = self.path(relative);
        std::fs::create_dir_all(&path).expect("mkdir");
        Folder::from_path(&path).await.expect("folder")
    }
}

/// Answers from a switch the test can flip, counting requests
pub struct Switch {
    pub granted: std::sync::atomic::AtomicBool,
    pub requests: AtomicUsize,
}

impl Switch {
    pub fn new(granted: bool) -> Arc<Self> {
        Arc::new(Self {
            granted: std::sync::atomic::AtomicBool::new(granted),
            requests: AtomicUsize::new(0),
        })
    }

    pub fn set(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }
}

#[async_trait]
impl PermissionProvider for Switch {
    async fn check(&self, _access: StorageAccess) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    async fn request(&self, _access: StorageAccess) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.granted.load(Ordering::SeqCst)
    }
}

pub fn write(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).expect("write");
}
