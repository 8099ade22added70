//! Desktop folder layout
//!
//! Well-known folders are the user's library directories. There is no
//! removable storage notion, so `SDCard` is unsupported.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PlatformKind;
use crate::error::StorageError;
use crate::platform::{
    PathResolver, SpecialDirectory, SpecialFolders, WellKnownFolder, existing_folder,
};
use crate::storage::Folder;

pub struct DesktopResolver {
    folders: Arc<dyn SpecialFolders>,
}

impl DesktopResolver {
    pub fn new(folders: Arc<dyn SpecialFolders>) -> Self {
        Self { folders }
    }
}

#[async_trait]
impl PathResolver for DesktopResolver {
    fn platform(&self) -> PlatformKind {
        PlatformKind::Desktop
    }

    async fn resolve(&self, kind: WellKnownFolder) -> Result<Option<Folder>, StorageError> {
        let (dir, display_name) = match kind {
            // no library entry for downloads, the name is ours
            WellKnownFolder::Downloads => (SpecialDirectory::Downloads, Some("Downloads")),
            WellKnownFolder::Movies => (SpecialDirectory::Videos, None),
            WellKnownFolder::Music => (SpecialDirectory::Music, None),
            WellKnownFolder::Pictures => (SpecialDirectory::Pictures, None),
            WellKnownFolder::CameraRoll => (SpecialDirectory::CameraRoll, None),
            WellKnownFolder::Documents | WellKnownFolder::Home | WellKnownFolder::Root => {
                (SpecialDirectory::Documents, None)
            }
            WellKnownFolder::SDCard => return Ok(None),
        };

        existing_folder(self.folders.lookup(dir), display_name).await
    }
}
