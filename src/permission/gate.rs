//! Permission gate implementation

use async_trait::async_trait;
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

/// Kind of storage access a permission covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageAccess {
    Read,
    Write,
}

impl fmt::Display for StorageAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageAccess::Read => write!(f, "read"),
            StorageAccess::Write => write!(f, "write"),
        }
    }
}

/// External capability that knows the OS permission state.
///
/// `request` may show a platform prompt; how is up to the implementor.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Current status of `access`, without prompting
    async fn check(&self, access: StorageAccess) -> bool;

    /// Ask for `access`, returning whether it ended up granted
    async fn request(&self, access: StorageAccess) -> bool;
}

/// Checks and requests read and write storage access
#[derive(Clone)]
pub struct PermissionGate {
    provider: Arc<dyn PermissionProvider>,
}

impl PermissionGate {
    pub fn new(provider: Arc<dyn PermissionProvider>) -> Self {
        Self { provider }
    }

    /// Returns true only when both read and write access are granted.
    ///
    /// Nothing is cached: every call re-checks and re-requests.
    pub async fn request_access(&self) -> bool {
        for access in [StorageAccess::Read, StorageAccess::Write] {
            if self.provider.check(access).await {
                continue;
            }

            debug!("Storage {} access not granted, requesting", access);
            if !self.provider.request(access).await {
                warn!("Storage {} access denied", access);
                return false;
            }
        }
        true
    }
}

impl fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionGate").finish_non_exhaustive()
    }
}
