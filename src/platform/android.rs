//! Android folder layout
//!
//! Media folders are fixed subfolders of the external storage root.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PlatformKind;
use crate::error::StorageError;
use crate::platform::{
    PathResolver, SpecialDirectory, SpecialFolders, WellKnownFolder, existing_folder,
};
use crate::storage::Folder;

pub struct AndroidResolver {
    folders: Arc<dyn SpecialFolders>,
}

impl AndroidResolver {
    pub fn new(folders: Arc<dyn SpecialFolders>) -> Self {
        Self { folders }
    }

    fn subfolder(kind: WellKnownFolder) -> Option<&'static str> {
        match kind {
            WellKnownFolder::Downloads => Some("Downloads"),
            WellKnownFolder::Movies => Some("Movies"),
            WellKnownFolder::Music => Some("Music"),
            WellKnownFolder::Pictures => Some("DCIM"),
            WellKnownFolder::CameraRoll => Some("DCIM/Camera"),
            _ => None,
        }
    }
}

#[async_trait]
impl PathResolver for AndroidResolver {
    fn platform(&self) -> PlatformKind {
        PlatformKind::Android
    }

    async fn resolve(&self, kind: WellKnownFolder) -> Result<Option<Folder>, StorageError> {
        let path = match kind {
            WellKnownFolder::SDCard => self.folders.lookup(SpecialDirectory::RemovableStorage),
            WellKnownFolder::Root => self.folders.lookup(SpecialDirectory::SystemRoot),
            _ => {
                let home = self.folders.lookup(SpecialDirectory::ExternalStorage);
                match Self::subfolder(kind) {
                    Some(sub) => home.map(|home| home.join(sub)),
                    // home and documents are the storage root itself
                    None => home,
                }
            }
        };

        existing_folder(path, None).await
    }
}
