//! Apple folder layout
//!
//! Apps see their own sandboxed library folders. Downloads and home fall
//! back to documents, and the personal directory stands in for both
//! `SDCard` and `Root`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PlatformKind;
use crate::error::StorageError;
use crate::platform::{
    PathResolver, SpecialDirectory, SpecialFolders, WellKnownFolder, existing_folder,
};
use crate::storage::Folder;

pub struct AppleResolver {
    folders: Arc<dyn SpecialFolders>,
}

impl AppleResolver {
    pub fn new(folders: Arc<dyn SpecialFolders>) -> Self {
        Self { folders }
    }
}

#[async_trait]
impl PathResolver for AppleResolver {
    fn platform(&self) -> PlatformKind {
        PlatformKind::Apple
    }

    async fn resolve(&self, kind: WellKnownFolder) -> Result<Option<Folder>, StorageError> {
        let dir = match kind {
            WellKnownFolder::Documents | WellKnownFolder::Downloads | WellKnownFolder::Home => {
                SpecialDirectory::Documents
            }
            WellKnownFolder::Music => SpecialDirectory::Music,
            WellKnownFolder::Pictures | WellKnownFolder::CameraRoll => SpecialDirectory::Pictures,
            WellKnownFolder::Movies => SpecialDirectory::Videos,
            WellKnownFolder::SDCard | WellKnownFolder::Root => SpecialDirectory::Home,
        };

        existing_folder(self.folders.lookup(dir), None).await
    }
}
